// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::database::connection_wrapper::TransactionWrapper;
use crate::ip_range_record::{IpRangeRecord, SkipReason};
use crate::logger::Logger;
use crate::{debug, info};
use csv::StringRecord;
use rusqlite::params;
use std::fmt;

pub const INSERT_IP_RANGE_SQL: &str =
    "insert into iptable (start, end, country_code, city) values (?, ?, ?, ?)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, PartialEq)]
pub enum LoadError {
    // The store refused a statement; nothing in the batch should be committed.
    SqliteError(rusqlite::Error),
    // The input stopped being readable part way through.
    InputError(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::SqliteError(e) => write!(f, "{}", e),
            LoadError::InputError(msg) => write!(f, "Could not read CSV input: {}", msg),
        }
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(e: rusqlite::Error) -> Self {
        LoadError::SqliteError(e)
    }
}

pub trait IpRangeDao {
    /// Coerces and inserts every row inside `txn`. Rows that don't coerce are dropped; the
    /// first store error ends the load and is handed back uncommitted.
    fn load_rows(
        &self,
        txn: &dyn TransactionWrapper,
        rows: &mut dyn Iterator<Item = Result<StringRecord, csv::Error>>,
    ) -> Result<LoadSummary, LoadError>;
}

pub struct IpRangeDaoReal {
    logger: Logger,
}

impl Default for IpRangeDaoReal {
    fn default() -> Self {
        Self {
            logger: Logger::new("IpRangeDao"),
        }
    }
}

impl IpRangeDao for IpRangeDaoReal {
    fn load_rows(
        &self,
        txn: &dyn TransactionWrapper,
        rows: &mut dyn Iterator<Item = Result<StringRecord, csv::Error>>,
    ) -> Result<LoadSummary, LoadError> {
        let mut stmt = txn.prepare(INSERT_IP_RANGE_SQL)?;
        let mut summary = LoadSummary::default();
        for (idx, row) in rows.enumerate() {
            match Self::coerce(row)? {
                Ok(record) => {
                    stmt.execute(params![
                        record.start,
                        record.end,
                        record.country_code,
                        record.city
                    ])?;
                    summary.inserted += 1;
                }
                Err(reason) => {
                    debug!(self.logger, "Skipping row {}: {}", idx + 1, reason);
                    summary.skipped += 1;
                }
            }
        }
        info!(
            self.logger,
            "Inserted {} rows; skipped {}", summary.inserted, summary.skipped
        );
        Ok(summary)
    }
}

impl IpRangeDaoReal {
    pub fn new() -> Self {
        Self::default()
    }

    fn coerce(
        row: Result<StringRecord, csv::Error>,
    ) -> Result<Result<IpRangeRecord, SkipReason>, LoadError> {
        match row {
            Ok(string_record) => Ok(IpRangeRecord::try_from(&string_record)),
            Err(e) if e.is_io_error() => Err(LoadError::InputError(e.to_string())),
            Err(e) => Ok(Err(SkipReason::Unreadable(e.to_string()))),
        }
    }
}
