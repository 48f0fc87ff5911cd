// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::database::db_initializer::{DbInitializer, DbInitializerReal, InitializationError};
use crate::info;
use crate::ip_range_csv::IpRangeCsvReader;
use crate::ip_range_dao::{IpRangeDao, IpRangeDaoReal, LoadError};
use crate::loader_config::{ConfigError, LoaderConfig};
use crate::logger::Logger;
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

pub const USAGE: &str = "Usage:\n\tip_range_loader database.csv";

#[derive(Debug, PartialEq)]
pub enum LoaderError {
    Config(ConfigError),
    CsvFile(PathBuf, String),
    Database(PathBuf, InitializationError),
    Load(LoadError),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Config(e) => write!(f, "{}", e),
            LoaderError::CsvFile(path, msg) => {
                write!(f, "Could not open CSV file {}: {}", path.display(), msg)
            }
            LoaderError::Database(path, e) => {
                write!(f, "Could not open database {}: {}", path.display(), e)
            }
            LoaderError::Load(e) => write!(f, "Import aborted; nothing was committed: {}", e),
        }
    }
}

impl From<ConfigError> for LoaderError {
    fn from(e: ConfigError) -> Self {
        LoaderError::Config(e)
    }
}

impl From<LoadError> for LoaderError {
    fn from(e: LoadError) -> Self {
        LoaderError::Load(e)
    }
}

impl From<rusqlite::Error> for LoaderError {
    fn from(e: rusqlite::Error) -> Self {
        LoaderError::Load(LoadError::SqliteError(e))
    }
}

pub fn ip_range_loader(
    args: &[OsString],
    stdout: &mut dyn io::Write,
    stderr: &mut dyn io::Write,
    config: Result<LoaderConfig, ConfigError>,
) -> i32 {
    IpRangeLoader::new().go(args, stdout, stderr, config)
}

pub struct IpRangeLoader {
    db_initializer: Box<dyn DbInitializer>,
    ip_range_dao: Box<dyn IpRangeDao>,
    logger: Logger,
}

impl Default for IpRangeLoader {
    fn default() -> Self {
        Self {
            db_initializer: Box::new(DbInitializerReal::new()),
            ip_range_dao: Box::new(IpRangeDaoReal::new()),
            logger: Logger::new("IpRangeLoader"),
        }
    }
}

impl IpRangeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process exit code: 1 for a wrong argument count (usage on stdout) or for any
    /// failure reported on stderr, 0 otherwise, including when the table already existed and
    /// nothing was loaded. A bad configuration is only reported once the arguments are known to
    /// be right.
    pub fn go(
        &self,
        args: &[OsString],
        stdout: &mut dyn io::Write,
        stderr: &mut dyn io::Write,
        config: Result<LoaderConfig, ConfigError>,
    ) -> i32 {
        if args.len() != 2 {
            let _ = writeln!(stdout, "{}", USAGE);
            return 1;
        }
        let result = config
            .map_err(LoaderError::from)
            .and_then(|config| self.load(Path::new(&args[1]), &config));
        match result {
            Ok(()) => 0,
            Err(e) => {
                let _ = writeln!(stderr, "{}", e);
                1
            }
        }
    }

    fn load(&self, csv_path: &Path, config: &LoaderConfig) -> Result<(), LoaderError> {
        let file = File::open(csv_path)
            .map_err(|e| LoaderError::CsvFile(csv_path.to_path_buf(), e.to_string()))?;
        let mut conn = self
            .db_initializer
            .connect(&config.database_path)
            .map_err(|e| LoaderError::Database(config.database_path.clone(), e))?;
        let reader = IpRangeCsvReader::new(file);
        if !self.db_initializer.create_ip_range_table(conn.as_ref()) {
            info!(
                self.logger,
                "Table was not created in {}; loading nothing from {}",
                config.database_path.display(),
                csv_path.display()
            );
            return Ok(());
        }
        let txn = conn.transaction()?;
        let summary = self
            .ip_range_dao
            .load_rows(txn.as_ref(), &mut reader.into_records())?;
        txn.commit()?;
        info!(
            self.logger,
            "Committed {} rows from {} into {}",
            summary.inserted,
            csv_path.display(),
            config.database_path.display()
        );
        Ok(())
    }
}
