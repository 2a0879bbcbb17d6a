use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, Owned};

/// Lifecycle state of a budget goal.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Failed,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 3] = [GoalStatus::Active, GoalStatus::Completed, GoalStatus::Failed];

    pub fn as_str(self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = crate::core::errors::FinanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        GoalStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| {
                crate::core::errors::FinanceError::invalid(format!(
                    "unknown goal status `{}`",
                    raw
                ))
            })
    }
}

/// A savings or spending target with a deadline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BudgetGoal {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        target_amount: f64,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
            status: GoalStatus::Active,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Active goals past their deadline.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.deadline < now
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn progress_percent(&self) -> Option<f64> {
        if self.target_amount > f64::EPSILON {
            Some((self.current_amount / self.target_amount) * 100.0)
        } else {
            None
        }
    }

    pub fn target_reached(&self) -> bool {
        self.target_amount > f64::EPSILON && self.current_amount >= self.target_amount
    }
}

impl Identifiable for BudgetGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for BudgetGoal {
    fn owner(&self) -> Uuid {
        self.user_id
    }
}

impl Displayable for BudgetGoal {
    fn display_label(&self) -> String {
        format!("{} ({}) due {}", self.name, self.status, self.deadline.date_naive())
    }
}
