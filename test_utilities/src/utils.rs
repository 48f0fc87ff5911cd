// Copyright (c) 2019, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use std::fs;
use std::path::{Path, PathBuf};

pub const BASE_TEST_DIR: &str = "generated/test";

pub fn test_home_directory(module: &str, name: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}/{}/home", BASE_TEST_DIR, module, name))
}

pub fn ensure_test_home_directory_does_not_exist(module: &str, name: &str) -> PathBuf {
    let home_dir = test_home_directory(module, name);
    let _ = fs::remove_dir_all(&home_dir);
    home_dir
}

pub fn recreate_data_dir(home_dir: &Path) -> PathBuf {
    let _ = fs::remove_dir_all(home_dir);
    let _ = fs::create_dir_all(home_dir);
    home_dir.to_path_buf()
}

pub fn ensure_test_home_directory_exists(module: &str, name: &str) -> PathBuf {
    let home_dir = test_home_directory(module, name);
    let _ = recreate_data_dir(&home_dir);
    home_dir
}
