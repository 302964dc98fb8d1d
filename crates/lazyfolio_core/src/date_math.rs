//! Calendar helpers for month bucketing and day counts.
//!
//! Contribution scheduling and monthly summaries only care about which
//! calendar month a trading date falls in, so months are compared as plain
//! `(year, month)` keys.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i16,
    pub month: i8,
}

impl MonthKey {
    #[must_use]
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Number of calendar days from `d1` to `d2` (positive when `d2 > d1`).
#[must_use]
pub fn days_between(d1: Date, d2: Date) -> i32 {
    d1.until(d2).map_or(0, |span| span.get_days())
}
