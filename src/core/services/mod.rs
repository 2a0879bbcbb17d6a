pub mod analytics_service;
pub mod goal_service;
pub mod transaction_service;

pub use analytics_service::AnalyticsService;
pub use goal_service::{GoalService, NewGoal};
pub use transaction_service::{NewTransaction, TransactionService};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    errors::{FinanceError, Result},
    period_range::compute_range,
};
use crate::domain::{DateInterval, PeriodToken};

pub type ServiceResult<T> = Result<T>;

/// Default number of upcoming goals reported by goal statistics.
pub const DEFAULT_CLOSEST_GOALS: usize = 3;

/// Period selection shared by the statistics requests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodQuery {
    pub period: PeriodToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl PeriodQuery {
    pub fn named(period: PeriodToken) -> Self {
        Self {
            period,
            start_date: None,
            end_date: None,
        }
    }

    pub fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            period: PeriodToken::Custom,
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateInterval> {
        compute_range(self.period, now, self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalStatsQuery {
    #[serde(flatten)]
    pub range: PeriodQuery,
    #[serde(default = "default_closest_count")]
    pub closest_count: usize,
}

impl GoalStatsQuery {
    pub fn new(range: PeriodQuery, closest_count: usize) -> Self {
        Self {
            range,
            closest_count,
        }
    }
}

impl Default for GoalStatsQuery {
    fn default() -> Self {
        Self::new(PeriodQuery::default(), DEFAULT_CLOSEST_GOALS)
    }
}

fn default_closest_count() -> usize {
    DEFAULT_CLOSEST_GOALS
}

/// Rejects NaN, infinities and negative amounts.
pub(crate) fn validate_amount(amount: f64, what: &str) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(FinanceError::invalid(format!(
            "{} must be a non-negative number, got {}",
            what, amount
        )))
    }
}

#[cfg(test)]
mod tests;
