//! Persistence seam for transactions and goals.

pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::{
    core::errors::Result,
    domain::{BudgetGoal, DateInterval, Identifiable, Owned, Transaction, TransactionKind},
};

/// Read and write access to a user's expenses and payments.
///
/// Every read excludes soft-deleted records.
pub trait TransactionStore: Send + Sync {
    /// Live transactions of `kind` whose date lies inside `interval`.
    fn fetch_transactions(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        interval: &DateInterval,
    ) -> Result<Vec<Transaction>>;

    /// Sum of effective amounts inside `interval`. Backends with native aggregation may
    /// override this.
    fn fetch_period_total(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        interval: &DateInterval,
    ) -> Result<f64> {
        Ok(self
            .fetch_transactions(user_id, kind, interval)?
            .iter()
            .map(Transaction::effective_amount)
            .sum())
    }

    /// Looks up a transaction regardless of its deletion state.
    fn find_transaction(&self, user_id: Uuid, id: Uuid) -> Result<Option<Transaction>>;
    fn insert_transaction(&self, transaction: Transaction) -> Result<()>;
    /// Replaces the stored record with the same id.
    fn save_transaction(&self, transaction: &Transaction) -> Result<()>;
    fn list_transactions(
        &self,
        user_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>>;
}

/// Read and write access to a user's budget goals.
pub trait GoalStore: Send + Sync {
    /// Live goals created inside `interval`.
    fn fetch_goals(&self, user_id: Uuid, interval: &DateInterval) -> Result<Vec<BudgetGoal>>;
    fn find_goal(&self, user_id: Uuid, id: Uuid) -> Result<Option<BudgetGoal>>;
    fn insert_goal(&self, goal: BudgetGoal) -> Result<()>;
    fn save_goal(&self, goal: &BudgetGoal) -> Result<()>;
    fn list_goals(&self, user_id: Uuid) -> Result<Vec<BudgetGoal>>;
}

pub(crate) fn transaction_matches(
    txn: &Transaction,
    user_id: Uuid,
    kind: TransactionKind,
    interval: &DateInterval,
) -> bool {
    txn.is_owned_by(user_id) && txn.kind == kind && !txn.is_deleted() && interval.contains(txn.date)
}

pub(crate) fn contains_id<T: Identifiable>(records: &[T], id: Uuid) -> bool {
    records.iter().any(|record| record.id() == id)
}

pub(crate) fn goal_matches(goal: &BudgetGoal, user_id: Uuid, interval: &DateInterval) -> bool {
    goal.is_owned_by(user_id) && !goal.is_deleted() && interval.contains(goal.created_at)
}

pub use json_backend::{JsonStore, UserDocument, DOCUMENT_SCHEMA_VERSION};
pub use memory::MemoryStore;
