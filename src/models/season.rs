//! Football season labels.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// First month of a new season (August).
const SEASON_START_MONTH: u32 = 8;

/// A European-style season spanning two calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    /// Season that is running on the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        let start_year = if date.month() >= SEASON_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    /// Label such as "2025/2026".
    pub fn label(&self) -> String {
        format!("{}/{}", self.start_year, self.start_year + 1)
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
