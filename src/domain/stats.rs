use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    goal::{BudgetGoal, GoalStatus},
    period::{DateInterval, PeriodToken},
    transaction::TransactionKind,
};

/// One point of a trend series (a day or a month).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Aggregated spending over an interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodStats {
    pub total_spent: f64,
    pub daily_average: f64,
    pub trend: Vec<TrendPoint>,
    /// Sorted by amount, largest first.
    pub categories: Vec<CategoryTotal>,
    pub transaction_count: usize,
}

/// Spending change against the preceding period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VelocityResult {
    pub percent_change: Option<f64>,
    pub message: String,
    /// `false` when the period kind has no comparable predecessor.
    pub available: bool,
}

impl VelocityResult {
    pub fn not_available() -> Self {
        Self {
            percent_change: None,
            message: "velocity not available for custom periods".into(),
            available: false,
        }
    }
}

/// Response of the period statistics request for expenses or payments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsReport {
    pub period: PeriodToken,
    pub kind: TransactionKind,
    pub interval: DateInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_interval: Option<DateInterval>,
    pub stats: PeriodStats,
    pub velocity: VelocityResult,
    pub tracking_streak: u32,
}

/// Goal counts per status; every status is always reported.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub active: usize,
    pub completed: usize,
    pub failed: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: GoalStatus) {
        match status {
            GoalStatus::Active => self.active += 1,
            GoalStatus::Completed => self.completed += 1,
            GoalStatus::Failed => self.failed += 1,
        }
    }

    pub fn get(&self, status: GoalStatus) -> usize {
        match status {
            GoalStatus::Active => self.active,
            GoalStatus::Completed => self.completed,
            GoalStatus::Failed => self.failed,
        }
    }

    pub fn total(&self) -> usize {
        self.active + self.completed + self.failed
    }
}

/// Condensed view of a goal for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalSummary {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: DateTime<Utc>,
    pub days_remaining: i64,
    pub progress_percent: Option<f64>,
}

impl GoalSummary {
    pub fn from_goal(goal: &BudgetGoal, now: DateTime<Utc>) -> Self {
        Self {
            id: goal.id,
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline,
            days_remaining: (goal.deadline.date_naive() - now.date_naive()).num_days(),
            progress_percent: goal.progress_percent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalStats {
    pub period: PeriodToken,
    pub interval: DateInterval,
    pub status_counts: StatusCounts,
    pub total_goals: usize,
    pub overdue_goals: usize,
    pub closest_goals: Vec<GoalSummary>,
}
