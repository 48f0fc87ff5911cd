// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use csv::{Reader, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io;

// Headerless, comma-separated, any number of fields per line. Short lines are the loader's
// business, not the reader's, so `flexible` keeps them from becoming format errors.
pub struct IpRangeCsvReader<R: io::Read> {
    csv_rdr: Reader<R>,
}

impl<R: io::Read> IpRangeCsvReader<R> {
    pub fn new(input: R) -> Self {
        let csv_rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        Self { csv_rdr }
    }

    /// Lazy, single pass; yields one field list per source line.
    pub fn into_records(self) -> StringRecordsIntoIter<R> {
        self.csv_rdr.into_records()
    }
}

impl<R: io::Read> IntoIterator for IpRangeCsvReader<R> {
    type Item = Result<StringRecord, csv::Error>;
    type IntoIter = StringRecordsIntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_records()
    }
}
