use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::KakeiboError;

/// A calendar month, labelled `YYYY/MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, KakeiboError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| KakeiboError::InvalidMonth(format!("{year:04}/{month:02}")))
    }

    pub fn first_day(&self) -> NaiveDate {
        // `new` only admits valid months.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

/// Accepts `YYYY/MM` labels and the `YYYY-MM` prefix of stored dates.
impl FromStr for YearMonth {
    type Err = KakeiboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KakeiboError::InvalidMonth(s.to_string());
        let (y, m) = s
            .split_once('/')
            .or_else(|| s.split_once('-'))
            .ok_or_else(invalid)?;
        let year: i32 = y.trim().parse().map_err(|_| invalid())?;
        let month: u32 = m.trim().parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
