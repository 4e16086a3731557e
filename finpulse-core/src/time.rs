//! Time utilities: calendar months and "today" in the user's timezone.

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            anyhow::bail!("invalid month: {month}");
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Shift by `delta` months, crossing year boundaries.
    pub fn add_months(self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Every month from `self` through `end`, inclusive; empty when `end` is earlier
    pub fn through(self, end: YearMonth) -> Vec<YearMonth> {
        let mut months = Vec::new();
        let mut m = self;
        while m <= end {
            months.push(m);
            m = m.add_months(1);
        }
        months
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Local calendar date for an IANA timezone like "America/Sao_Paulo".
pub fn local_today(tz: &str, now_utc: DateTime<Utc>) -> Result<NaiveDate> {
    let tz = parse_tz(tz)?;
    Ok(now_utc.with_timezone(&tz).date_naive())
}

/// Calendar month the user is currently in.
pub fn current_month(tz: &str, now_utc: DateTime<Utc>) -> Result<YearMonth> {
    Ok(YearMonth::containing(local_today(tz, now_utc)?))
}
