//! Season labels and the date-based rollover rule
//!
//! A season is named by the calendar year it ends in. The 2023-2024
//! Premier League season is season 2024.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// Month and day after which the next season's label becomes current
const ROLLOVER_MONTH: u32 = 8;
const ROLLOVER_DAY: u32 = 15;

/// Season label: the calendar year in which the season ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Season(pub i32);

impl Season {
    /// Maps a date to the season that is current on that date
    ///
    /// Any date after August 15 of year Y belongs to season Y+1. August 15
    /// itself and every earlier date belong to season Y.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use match_stats::Season;
    ///
    /// let date = NaiveDate::from_ymd_opt(2023, 9, 14).unwrap();
    /// assert_eq!(Season::for_date(date), Season(2024));
    /// ```
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year();
        if (date.month(), date.day()) > (ROLLOVER_MONTH, ROLLOVER_DAY) {
            Season(year + 1)
        } else {
            Season(year)
        }
    }

    /// The season that is current according to the local wall clock
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// The season immediately before this one
    pub fn previous(self) -> Self {
        Season(self.0 - 1)
    }

    /// The season's end year
    pub fn year(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
