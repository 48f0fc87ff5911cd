// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATABASE_FILE: &str = "test.db";
pub const DATABASE_PATH_ENV_VAR: &str = "IP_RANGE_LOADER_DATABASE_PATH";
pub const LOG_LEVEL_ENV_VAR: &str = "IP_RANGE_LOADER_LOG_LEVEL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
    pub database_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DATABASE_FILE),
            log_level: LevelFilter::Warn,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(String),
    InvalidLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyValue(name) => write!(f, "{} is set but empty", name),
            ConfigError::InvalidLogLevel(value) => write!(
                f,
                "{} must be one of off, error, warn, info, debug, trace; not '{}'",
                LOG_LEVEL_ENV_VAR, value
            ),
        }
    }
}

impl LoaderConfig {
    /// Builds a configuration from environment-style pairs; anything not recognized is ignored
    /// and anything not supplied keeps its default.
    pub fn from_env_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .try_fold(Self::default(), |mut config, (name, value)| {
                match name.as_str() {
                    DATABASE_PATH_ENV_VAR if value.is_empty() => {
                        return Err(ConfigError::EmptyValue(DATABASE_PATH_ENV_VAR.to_string()))
                    }
                    DATABASE_PATH_ENV_VAR => config.database_path = PathBuf::from(value),
                    LOG_LEVEL_ENV_VAR => {
                        config.log_level = LevelFilter::from_str(&value)
                            .map_err(|_| ConfigError::InvalidLogLevel(value))?
                    }
                    _ => (),
                }
                Ok(config)
            })
    }
}
