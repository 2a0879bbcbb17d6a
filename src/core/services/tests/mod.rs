mod analytics_service_tests;

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::core::errors::{FinanceError, Result};
use crate::domain::{BudgetGoal, DateInterval, Transaction, TransactionKind};
use crate::storage::{GoalStore, MemoryStore, TransactionStore};

pub(super) fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

/// Store that fails every call and counts how often it was reached.
#[derive(Default)]
pub(super) struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    fn fail<T>(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FinanceError::UpstreamFailure("connection reset".into()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransactionStore for FailingStore {
    fn fetch_transactions(
        &self,
        _user_id: Uuid,
        _kind: TransactionKind,
        _interval: &DateInterval,
    ) -> Result<Vec<Transaction>> {
        self.fail()
    }

    fn find_transaction(&self, _user_id: Uuid, _id: Uuid) -> Result<Option<Transaction>> {
        self.fail()
    }

    fn insert_transaction(&self, _transaction: Transaction) -> Result<()> {
        self.fail()
    }

    fn save_transaction(&self, _transaction: &Transaction) -> Result<()> {
        self.fail()
    }

    fn list_transactions(
        &self,
        _user_id: Uuid,
        _kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>> {
        self.fail()
    }
}

impl GoalStore for FailingStore {
    fn fetch_goals(&self, _user_id: Uuid, _interval: &DateInterval) -> Result<Vec<BudgetGoal>> {
        self.fail()
    }

    fn find_goal(&self, _user_id: Uuid, _id: Uuid) -> Result<Option<BudgetGoal>> {
        self.fail()
    }

    fn insert_goal(&self, _goal: BudgetGoal) -> Result<()> {
        self.fail()
    }

    fn save_goal(&self, _goal: &BudgetGoal) -> Result<()> {
        self.fail()
    }

    fn list_goals(&self, _user_id: Uuid) -> Result<Vec<BudgetGoal>> {
        self.fail()
    }
}

/// Serves transactions from memory but fails every period-total lookup.
pub(super) struct BrokenTotalsStore {
    pub inner: MemoryStore,
    pub total_calls: AtomicUsize,
}

impl BrokenTotalsStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            total_calls: AtomicUsize::new(0),
        }
    }
}

impl TransactionStore for BrokenTotalsStore {
    fn fetch_transactions(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        interval: &DateInterval,
    ) -> Result<Vec<Transaction>> {
        self.inner.fetch_transactions(user_id, kind, interval)
    }

    fn fetch_period_total(
        &self,
        _user_id: Uuid,
        _kind: TransactionKind,
        _interval: &DateInterval,
    ) -> Result<f64> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        Err(FinanceError::UpstreamFailure("aggregate query timed out".into()))
    }

    fn find_transaction(&self, user_id: Uuid, id: Uuid) -> Result<Option<Transaction>> {
        self.inner.find_transaction(user_id, id)
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<()> {
        self.inner.insert_transaction(transaction)
    }

    fn save_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.inner.save_transaction(transaction)
    }

    fn list_transactions(
        &self,
        user_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>> {
        self.inner.list_transactions(user_id, kind)
    }
}
