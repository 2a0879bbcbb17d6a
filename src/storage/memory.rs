use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::{
    core::errors::{FinanceError, Result},
    domain::{BudgetGoal, DateInterval, Owned, Transaction, TransactionKind},
};

use super::{contains_id, goal_matches, transaction_matches, GoalStore, TransactionStore};

/// Process-local store used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
    goals: RwLock<Vec<BudgetGoal>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(transactions: Vec<Transaction>, goals: Vec<BudgetGoal>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            goals: RwLock::new(goals),
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| FinanceError::UpstreamFailure("memory store lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| FinanceError::UpstreamFailure("memory store lock poisoned".into()))
}

impl TransactionStore for MemoryStore {
    fn fetch_transactions(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        interval: &DateInterval,
    ) -> Result<Vec<Transaction>> {
        Ok(read(&self.transactions)?
            .iter()
            .filter(|txn| transaction_matches(txn, user_id, kind, interval))
            .cloned()
            .collect())
    }

    fn find_transaction(&self, user_id: Uuid, id: Uuid) -> Result<Option<Transaction>> {
        Ok(read(&self.transactions)?
            .iter()
            .find(|txn| txn.id == id && txn.is_owned_by(user_id))
            .cloned())
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<()> {
        let mut guard = write(&self.transactions)?;
        if contains_id(guard.as_slice(), transaction.id) {
            return Err(FinanceError::invalid(format!(
                "transaction {} already exists",
                transaction.id
            )));
        }
        guard.push(transaction);
        Ok(())
    }

    fn save_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut guard = write(&self.transactions)?;
        let slot = guard
            .iter_mut()
            .find(|txn| txn.id == transaction.id && txn.user_id == transaction.user_id)
            .ok_or_else(|| FinanceError::NotFound(format!("transaction {}", transaction.id)))?;
        *slot = transaction.clone();
        Ok(())
    }

    fn list_transactions(
        &self,
        user_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>> {
        Ok(read(&self.transactions)?
            .iter()
            .filter(|txn| txn.is_owned_by(user_id) && !txn.is_deleted())
            .filter(|txn| kind.map_or(true, |k| txn.kind == k))
            .cloned()
            .collect())
    }
}

impl GoalStore for MemoryStore {
    fn fetch_goals(&self, user_id: Uuid, interval: &DateInterval) -> Result<Vec<BudgetGoal>> {
        Ok(read(&self.goals)?
            .iter()
            .filter(|goal| goal_matches(goal, user_id, interval))
            .cloned()
            .collect())
    }

    fn find_goal(&self, user_id: Uuid, id: Uuid) -> Result<Option<BudgetGoal>> {
        Ok(read(&self.goals)?
            .iter()
            .find(|goal| goal.id == id && goal.is_owned_by(user_id))
            .cloned())
    }

    fn insert_goal(&self, goal: BudgetGoal) -> Result<()> {
        let mut guard = write(&self.goals)?;
        if contains_id(guard.as_slice(), goal.id) {
            return Err(FinanceError::invalid(format!("goal {} already exists", goal.id)));
        }
        guard.push(goal);
        Ok(())
    }

    fn save_goal(&self, goal: &BudgetGoal) -> Result<()> {
        let mut guard = write(&self.goals)?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == goal.id && existing.user_id == goal.user_id)
            .ok_or_else(|| FinanceError::NotFound(format!("goal {}", goal.id)))?;
        *slot = goal.clone();
        Ok(())
    }

    fn list_goals(&self, user_id: Uuid) -> Result<Vec<BudgetGoal>> {
        Ok(read(&self.goals)?
            .iter()
            .filter(|goal| goal.is_owned_by(user_id) && !goal.is_deleted())
            .cloned()
            .collect())
    }
}
