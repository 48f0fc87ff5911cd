// Copyright (c) 2019, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use flexi_logger::{DeferredNow, FlexiLoggerError, LogSpecBuilder, ReconfigurationHandle};
use log::{logger, Level, LevelFilter, Record};
use std::fmt::{Debug, Formatter};
use std::{io, thread};
use time::format_description::parse;
use time::OffsetDateTime;

pub const TIME_FORMATTING_STRING: &str =
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]";

#[derive(Clone)]
pub struct Logger {
    name: String,
    level_limit: Level,
}

impl Debug for Logger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Logger{{ name: \"{}\" }}", self.name)
    }
}

#[macro_export]
macro_rules! trace {
    ($logger: expr, $($arg:tt)*) => {
        $logger.trace(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger: expr, $($arg:tt)*) => {
        $logger.debug(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! info {
    ($logger: expr, $($arg:tt)*) => {
        $logger.info(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warning {
    ($logger: expr, $($arg:tt)*) => {
        $logger.warning(|| format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($logger: expr, $($arg:tt)*) => {
        $logger.error(|| format!($($arg)*))
    };
}

impl Logger {
    pub fn new(name: &str) -> Logger {
        Logger {
            name: String::from(name),
            level_limit: Level::Trace,
        }
    }

    pub fn trace<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Trace, log_function);
    }

    pub fn debug<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Debug, log_function);
    }

    pub fn info<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Info, log_function);
    }

    pub fn warning<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Warn, log_function);
    }

    pub fn error<F>(&self, log_function: F)
    where
        F: FnOnce() -> String,
    {
        self.generic_log(Level::Error, log_function);
    }

    pub fn level_enabled(&self, level: Level) -> bool {
        level <= self.level_limit
    }

    pub fn set_level_for_test(&mut self, level: Level) {
        self.level_limit = level
    }

    fn generic_log<F>(&self, level: Level, log_function: F)
    where
        F: FnOnce() -> String,
    {
        if self.level_enabled(level) {
            self.log(level, log_function())
        }
    }

    pub fn log(&self, level: Level, msg: String) {
        logger().log(
            &Record::builder()
                .args(format_args!("{}", msg))
                .module_path(Some(&self.name))
                .level(level)
                .build(),
        );
    }
}

// Diagnostics go to stderr only; stdout belongs to the usage message.
pub fn start_logging(level: LevelFilter) -> Result<ReconfigurationHandle, FlexiLoggerError> {
    flexi_logger::Logger::with(
        LogSpecBuilder::new()
            .default(level)
            .module("rusqlite", LevelFilter::Off)
            .build(),
    )
    .format(format_function)
    .start()
}

// DeferredNow can't be constructed in a test; therefore this function is untestable...
fn format_function(
    write: &mut dyn io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), io::Error> {
    real_format_function(write, OffsetDateTime::now_utc(), record)
}

// ...but this one isn't.
pub fn real_format_function(
    write: &mut dyn io::Write,
    timestamp: OffsetDateTime,
    record: &Record,
) -> Result<(), io::Error> {
    let format =
        parse(TIME_FORMATTING_STRING).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let timestamp = timestamp
        .format(&format)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let thread_id_str = format!("{:?}", thread::current().id());
    let thread_id = thread_id_str
        .trim_start_matches("ThreadId(")
        .trim_end_matches(')');
    let level = record.level();
    let name = record.module_path().unwrap_or("<unnamed>");
    write.write_fmt(format_args!(
        "{} Thd{}: {}: {}: ",
        timestamp, thread_id, level, name
    ))?;
    write.write_fmt(*record.args())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utilities::byte_array_reader_writer::ByteArrayWriter;
    use test_utilities::logging::{init_test_logging, TestLogHandler};
    use time::macros::datetime;

    #[test]
    fn logger_format_is_correct() {
        init_test_logging();
        let one_logger = Logger::new("logger_format_is_correct_one");
        let another_logger = Logger::new("logger_format_is_correct_another");

        error!(one_logger, "one log");
        warning!(another_logger, "another {}", "log");

        let tlh = TestLogHandler::new();
        tlh.assert_logs_contain_in_order(vec![
            "ERROR: logger_format_is_correct_one: one log",
            "WARN: logger_format_is_correct_another: another log",
        ]);
    }

    #[test]
    fn every_level_macro_logs_at_its_own_level() {
        init_test_logging();
        let subject = Logger::new("every_level_macro_logs_at_its_own_level");

        trace!(subject, "trace {}", 1);
        debug!(subject, "debug {}", 2);
        info!(subject, "info {}", 3);

        TestLogHandler::new().assert_logs_contain_in_order(vec![
            "TRACE: every_level_macro_logs_at_its_own_level: trace 1",
            "DEBUG: every_level_macro_logs_at_its_own_level: debug 2",
            "INFO: every_level_macro_logs_at_its_own_level: info 3",
        ]);
    }

    #[test]
    fn disabled_levels_do_not_evaluate_the_message() {
        init_test_logging();
        let mut subject = Logger::new("disabled_levels_do_not_evaluate_the_message");
        subject.set_level_for_test(Level::Info);
        let mut debug_evaluated = false;
        let mut info_evaluated = false;

        subject.debug(|| {
            debug_evaluated = true;
            "debug message".to_string()
        });
        subject.info(|| {
            info_evaluated = true;
            "info message".to_string()
        });

        assert!(!debug_evaluated);
        assert!(info_evaluated);
        let tlh = TestLogHandler::new();
        tlh.exists_log_containing("INFO: disabled_levels_do_not_evaluate_the_message: info message");
        tlh.exists_no_log_containing("disabled_levels_do_not_evaluate_the_message: debug message");
    }

    #[test]
    fn real_format_function_writes_timestamp_thread_level_and_name() {
        let mut buffer = ByteArrayWriter::new();
        let timestamp = datetime!(2024-03-05 07:08:09.123 UTC);

        real_format_function(
            &mut buffer,
            timestamp,
            &Record::builder()
                .args(format_args!("Imported {} rows", 12))
                .module_path(Some("IpRangeDao"))
                .level(Level::Info)
                .build(),
        )
        .unwrap();

        let result = buffer.get_string();
        assert!(
            result.starts_with("2024-03-05 07:08:09.123 Thd"),
            "{}",
            result
        );
        assert!(
            result.ends_with(": INFO: IpRangeDao: Imported 12 rows"),
            "{}",
            result
        );
    }
}
