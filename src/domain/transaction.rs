use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, Owned};

/// Label used when a transaction carries no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Distinguishes day-to-day expenses from scheduled payments (bills, rent, loans).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Payment,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Payment => "payment",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = crate::core::errors::FinanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            "payment" | "payments" => Ok(TransactionKind::Payment),
            _ => Err(crate::core::errors::FinanceError::invalid(format!(
                "unknown transaction kind `{}`",
                raw
            ))),
        }
    }
}

/// A single expense or payment recorded by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub kind: TransactionKind,
    /// Raw stored amount. Use [`Transaction::effective_amount`] for arithmetic.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(user_id: Uuid, kind: TransactionKind, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount: Some(amount),
            date,
            category: None,
            description: None,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Amount used by aggregates: missing, non-finite or negative values count as zero.
    pub fn effective_amount(&self) -> f64 {
        match self.amount {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            _ => 0.0,
        }
    }

    /// Category label with the `Uncategorized` fallback applied.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => UNCATEGORIZED,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Transaction {
    fn owner(&self) -> Uuid {
        self.user_id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{}:{} {:.2} [{}]",
            self.kind,
            self.id,
            self.effective_amount(),
            self.category_label()
        )
    }
}

/// Accepts numbers and numeric strings; anything else reads as `None`.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}
