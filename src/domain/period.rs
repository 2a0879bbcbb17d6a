use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::{FinanceError, Result};

/// Symbolic period selecting how a date range is derived.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeriodToken {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

impl PeriodToken {
    /// Every period with a fixed day count.
    pub const NAMED: [PeriodToken; 4] = [
        PeriodToken::Weekly,
        PeriodToken::Monthly,
        PeriodToken::Quarterly,
        PeriodToken::Yearly,
    ];

    /// Length of the window in calendar days; `None` for custom ranges.
    pub fn day_count(self) -> Option<i64> {
        match self {
            PeriodToken::Weekly => Some(7),
            PeriodToken::Monthly => Some(30),
            PeriodToken::Quarterly => Some(90),
            PeriodToken::Yearly => Some(365),
            PeriodToken::Custom => None,
        }
    }

    /// Noun used in comparison messages ("last week", "last month").
    pub fn noun(self) -> &'static str {
        match self {
            PeriodToken::Weekly => "week",
            PeriodToken::Monthly => "month",
            PeriodToken::Quarterly => "quarter",
            PeriodToken::Yearly => "year",
            PeriodToken::Custom => "period",
        }
    }

    pub fn bucketing(self) -> Bucketing {
        match self {
            PeriodToken::Quarterly | PeriodToken::Yearly => Bucketing::Monthly,
            PeriodToken::Weekly | PeriodToken::Monthly | PeriodToken::Custom => Bucketing::Daily,
        }
    }

    pub fn is_custom(self) -> bool {
        self == PeriodToken::Custom
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodToken::Weekly => "weekly",
            PeriodToken::Monthly => "monthly",
            PeriodToken::Quarterly => "quarterly",
            PeriodToken::Yearly => "yearly",
            PeriodToken::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodToken {
    type Err = FinanceError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PeriodToken::Weekly),
            "monthly" => Ok(PeriodToken::Monthly),
            "quarterly" => Ok(PeriodToken::Quarterly),
            "yearly" => Ok(PeriodToken::Yearly),
            "custom" => Ok(PeriodToken::Custom),
            _ => Err(FinanceError::invalid(format!("unknown period `{}`", raw))),
        }
    }
}

/// Granularity of trend buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Bucketing {
    Daily,
    Monthly,
}

/// First instant of `date` in UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
}

/// Last millisecond of `date` in UTC (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// Inclusive `[start, end]` range of instants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(FinanceError::invalid(format!(
                "interval end {} precedes start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole-day interval from the start of `first` to the end of `last`.
    pub fn for_days(first: NaiveDate, last: NaiveDate) -> Result<Self> {
        Self::new(start_of_day(first), end_of_day(last))
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Number of calendar days touched by the interval, never below 1.
    pub fn day_count(&self) -> i64 {
        ((self.last_day() - self.first_day()).num_days() + 1).max(1)
    }

    /// Zero-based calendar-day offset of `instant` from the first day.
    pub fn day_index(&self, instant: DateTime<Utc>) -> Option<usize> {
        if !self.contains(instant) {
            return None;
        }
        usize::try_from((instant.date_naive() - self.first_day()).num_days()).ok()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first_day().iter_days().take(self.day_count() as usize)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
