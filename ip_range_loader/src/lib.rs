// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

pub mod database;
pub mod ip_range_csv;
pub mod ip_range_dao;
pub mod ip_range_loader;
pub mod ip_range_record;
pub mod loader_config;
pub mod logger;
