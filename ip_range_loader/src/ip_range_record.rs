// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use csv::StringRecord;
use std::fmt;

pub const START_COLUMN: usize = 0;
pub const END_COLUMN: usize = 1;
pub const COUNTRY_CODE_COLUMN: usize = 2;
pub const CITY_COLUMN: usize = 5;

/// One stored row: an integer address range and the country code and city it maps to.
/// No ordering is required between `start` and `end`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IpRangeRecord {
    pub start: i64,
    pub end: i64,
    pub country_code: Vec<u8>,
    pub city: Vec<u8>,
}

/// Why a CSV line did not become an [`IpRangeRecord`]. The loader drops such lines without
/// complaint; the reason exists for the debug log and for tests.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SkipReason {
    MissingField { index: usize, found: usize },
    InvalidInteger { index: usize, value: String },
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingField { index, found } => write!(
                f,
                "CSV line has {} fields; field {} is required",
                found, index
            ),
            SkipReason::InvalidInteger { index, value } => {
                write!(f, "Field {} is not an integer: '{}'", index, value)
            }
            SkipReason::Unreadable(msg) => write!(f, "CSV line is unreadable: {}", msg),
        }
    }
}

impl TryFrom<&StringRecord> for IpRangeRecord {
    type Error = SkipReason;

    fn try_from(string_record: &StringRecord) -> Result<Self, Self::Error> {
        let start = Self::integer_from(string_record, START_COLUMN)?;
        let end = Self::integer_from(string_record, END_COLUMN)?;
        let country_code = Self::field(string_record, COUNTRY_CODE_COLUMN)?;
        let city = Self::field(string_record, CITY_COLUMN)?;
        Ok(IpRangeRecord {
            start,
            end,
            country_code: country_code.as_bytes().to_vec(),
            city: city.as_bytes().to_vec(),
        })
    }
}

impl IpRangeRecord {
    pub fn new(start: i64, end: i64, country_code: &str, city: &str) -> Self {
        Self {
            start,
            end,
            country_code: country_code.as_bytes().to_vec(),
            city: city.as_bytes().to_vec(),
        }
    }

    fn field(string_record: &StringRecord, index: usize) -> Result<&str, SkipReason> {
        string_record.get(index).ok_or(SkipReason::MissingField {
            index,
            found: string_record.len(),
        })
    }

    // Padding whitespace and a leading sign are tolerated, as an integer literal would be.
    fn integer_from(string_record: &StringRecord, index: usize) -> Result<i64, SkipReason> {
        let value = Self::field(string_record, index)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| SkipReason::InvalidInteger {
                index,
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_have_correct_values() {
        assert_eq!(START_COLUMN, 0);
        assert_eq!(END_COLUMN, 1);
        assert_eq!(COUNTRY_CODE_COLUMN, 2);
        assert_eq!(CITY_COLUMN, 5);
    }

    #[test]
    fn try_from_keeps_only_the_four_stored_columns() {
        let string_record =
            StringRecord::from(vec!["10", "20", "US", "ignored1", "ignored2", "LosAngeles"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(
            result,
            Ok(IpRangeRecord {
                start: 10,
                end: 20,
                country_code: b"US".to_vec(),
                city: b"LosAngeles".to_vec(),
            })
        );
    }

    #[test]
    fn try_from_ignores_fields_past_the_city() {
        let string_record =
            StringRecord::from(vec!["1", "2", "JP", "Japan", "Tokyo", "Tokyo", "35.68", "139.69"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(result, Ok(IpRangeRecord::new(1, 2, "JP", "Tokyo")));
    }

    #[test]
    fn try_from_accepts_empty_text_fields() {
        let string_record = StringRecord::from(vec!["0", "16777215", "-", "", "", ""]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(result, Ok(IpRangeRecord::new(0, 16777215, "-", "")));
    }

    #[test]
    fn try_from_does_not_require_start_before_end() {
        let string_record = StringRecord::from(vec!["300", "100", "FR", "", "", "Paris"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(result, Ok(IpRangeRecord::new(300, 100, "FR", "Paris")));
    }

    #[test]
    fn try_from_tolerates_padding_and_sign() {
        let string_record = StringRecord::from(vec![" 7 ", "+8", "CN", "", "", "Fuzhou"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(result, Ok(IpRangeRecord::new(7, 8, "CN", "Fuzhou")));
    }

    #[test]
    fn try_from_stores_text_as_utf8_bytes() {
        let string_record = StringRecord::from(vec!["1", "2", "DE", "", "", "München"]);

        let result = IpRangeRecord::try_from(&string_record).unwrap();

        assert_eq!(result.city, "München".as_bytes().to_vec());
        assert_eq!(result.city.len(), 8);
    }

    #[test]
    fn try_from_fails_for_non_numeric_start() {
        let string_record = StringRecord::from(vec!["bad", "300", "FR", "", "", "Paris"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(
            result,
            Err(SkipReason::InvalidInteger {
                index: 0,
                value: "bad".to_string()
            })
        );
    }

    #[test]
    fn try_from_fails_for_non_numeric_end() {
        let string_record = StringRecord::from(vec!["1", "1.5", "FR", "", "", "Paris"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(
            result,
            Err(SkipReason::InvalidInteger {
                index: 1,
                value: "1.5".to_string()
            })
        );
    }

    #[test]
    fn try_from_fails_for_out_of_range_integer() {
        let string_record =
            StringRecord::from(vec!["1", "9223372036854775808", "FR", "", "", "Paris"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(
            result,
            Err(SkipReason::InvalidInteger {
                index: 1,
                value: "9223372036854775808".to_string()
            })
        );
    }

    #[test]
    fn try_from_fails_for_missing_start() {
        let strings: Vec<&str> = vec![];
        let string_record = StringRecord::from(strings);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(result, Err(SkipReason::MissingField { index: 0, found: 0 }));
    }

    #[test]
    fn try_from_fails_for_missing_city() {
        let string_record = StringRecord::from(vec!["1", "2", "US", "CA", "CA"]);

        let result = IpRangeRecord::try_from(&string_record);

        assert_eq!(result, Err(SkipReason::MissingField { index: 5, found: 5 }));
    }

    #[test]
    fn skip_reasons_display_properly() {
        assert_eq!(
            SkipReason::MissingField { index: 5, found: 3 }.to_string(),
            "CSV line has 3 fields; field 5 is required"
        );
        assert_eq!(
            SkipReason::InvalidInteger {
                index: 0,
                value: "bad".to_string()
            }
            .to_string(),
            "Field 0 is not an integer: 'bad'"
        );
        assert_eq!(
            SkipReason::Unreadable("invalid utf-8".to_string()).to_string(),
            "CSV line is unreadable: invalid utf-8"
        );
    }
}
