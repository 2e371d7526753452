//! Inclusive calendar date windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::DatecrawlError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A (year, month, day) triple as handed to the fetch contract.
pub type DateTriple = (i32, u32, u32);

/// A closed date interval. `start <= end` always holds; reversed bounds are
/// swapped on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_triple(&self) -> DateTriple {
        triple(self.start)
    }

    pub fn end_triple(&self) -> DateTriple {
        triple(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn triple(date: NaiveDate) -> DateTriple {
    (date.year(), date.month(), date.day())
}

impl FromStr for DateWindow {
    type Err = DatecrawlError;

    /// Parses `YYYY-MM-DD:YYYY-MM-DD`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| DatecrawlError::InvalidDateWindow {
            input: input.to_string(),
            message,
        };

        let (a, b) = input
            .split_once(':')
            .ok_or_else(|| invalid("expected YYYY-MM-DD:YYYY-MM-DD".to_string()))?;
        if b.contains(':') {
            return Err(invalid("expected exactly one ':' separator".to_string()));
        }

        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .map_err(|e| invalid(format!("'{}': {}", s.trim(), e)))
        };

        Ok(DateWindow::new(parse(a)?, parse(b)?))
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
