// Copyright (c) 2017-2019, Substratum LLC (https://substratum.net) and/or its affiliates. All rights reserved.

use crate::database::connection_wrapper::{ConnectionWrapper, ConnectionWrapperReal};
use crate::debug;
use crate::logger::Logger;
use rusqlite::{Connection, OpenFlags};
use std::fmt;
use std::path::Path;

#[derive(Debug, PartialEq)]
pub enum InitializationError {
    SqliteError(rusqlite::Error),
}

impl fmt::Display for InitializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitializationError::SqliteError(e) => write!(f, "{}", e),
        }
    }
}

pub trait DbInitializer {
    fn connect(&self, path: &Path) -> Result<Box<dyn ConnectionWrapper>, InitializationError>;
    fn create_ip_range_table(&self, conn: &dyn ConnectionWrapper) -> bool;
}

pub struct DbInitializerReal {
    logger: Logger,
}

impl Default for DbInitializerReal {
    fn default() -> Self {
        Self {
            logger: Logger::new("DbInitializer"),
        }
    }
}

impl DbInitializer for DbInitializerReal {
    fn connect(&self, path: &Path) -> Result<Box<dyn ConnectionWrapper>, InitializationError> {
        let mut flags = OpenFlags::empty();
        flags.insert(OpenFlags::SQLITE_OPEN_READ_WRITE);
        flags.insert(OpenFlags::SQLITE_OPEN_CREATE);
        match Connection::open_with_flags(path, flags) {
            Ok(conn) => {
                debug!(self.logger, "Opened database at {}", path.display());
                Ok(Box::new(ConnectionWrapperReal::new(conn)))
            }
            Err(e) => Err(InitializationError::SqliteError(e)),
        }
    }

    // No "if not exists": a table that is already there reports false, and the caller treats
    // every false the same way.
    fn create_ip_range_table(&self, conn: &dyn ConnectionWrapper) -> bool {
        match conn.execute(
            "create table iptable (
                start integer not null unique,
                end integer not null unique,
                country_code blob not null,
                city blob not null
            )",
            &[],
        ) {
            Ok(_) => true,
            Err(e) => {
                debug!(self.logger, "Could not create iptable table: {}", e);
                false
            }
        }
    }
}

impl DbInitializerReal {
    pub fn new() -> Self {
        Self::default()
    }
}
