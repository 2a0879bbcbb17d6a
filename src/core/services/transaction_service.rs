//! Business logic helpers for recording expenses and payments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{errors::FinanceError, time::Clock};
use crate::domain::{Displayable, Transaction, TransactionKind};
use crate::storage::TransactionStore;

use super::{validate_amount, ServiceResult};

/// Input for a new expense or payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    pub user_id: Uuid,
    #[serde(default)]
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Provides validated CRUD helpers for transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates and stores a new transaction, returning the stored record.
    pub fn record(
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        input: NewTransaction,
    ) -> ServiceResult<Transaction> {
        validate_amount(input.amount, "amount")?;
        let mut txn = Transaction::new(input.user_id, input.kind, input.amount, input.date);
        txn.category = input.category.filter(|label| !label.trim().is_empty());
        if let Some(description) = input.description {
            txn = txn.with_description(description);
        }
        txn.created_at = clock.now();
        store.insert_transaction(txn.clone())?;
        tracing::info!(user = %txn.user_id, record = %txn.display_label(), "transaction recorded");
        Ok(txn)
    }

    /// Applies `mutator` to a live transaction and persists the result.
    pub fn update<F>(
        store: &dyn TransactionStore,
        user_id: Uuid,
        id: Uuid,
        mutator: F,
    ) -> ServiceResult<Transaction>
    where
        F: FnOnce(&mut Transaction),
    {
        let mut txn = Self::live(store, user_id, id)?;
        mutator(&mut txn);
        if txn.id != id || txn.user_id != user_id {
            return Err(FinanceError::invalid("transaction id and owner cannot change"));
        }
        if let Some(amount) = txn.amount {
            validate_amount(amount, "amount")?;
        }
        store.save_transaction(&txn)?;
        tracing::info!(user = %user_id, id = %id, "transaction updated");
        Ok(txn)
    }

    /// Flags the transaction as deleted; it stays stored but leaves every aggregate.
    pub fn soft_delete(
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        user_id: Uuid,
        id: Uuid,
    ) -> ServiceResult<Transaction> {
        let mut txn = store
            .find_transaction(user_id, id)?
            .ok_or_else(|| not_found(id))?;
        if txn.is_deleted() {
            return Err(FinanceError::invalid(format!(
                "transaction {} is already deleted",
                id
            )));
        }
        txn.mark_deleted(clock.now());
        store.save_transaction(&txn)?;
        tracing::info!(user = %user_id, id = %id, "transaction soft-deleted");
        Ok(txn)
    }

    /// Live transactions for a user, newest first.
    pub fn list(
        store: &dyn TransactionStore,
        user_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> ServiceResult<Vec<Transaction>> {
        let mut txns = store.list_transactions(user_id, kind)?;
        txns.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(txns)
    }

    fn live(store: &dyn TransactionStore, user_id: Uuid, id: Uuid) -> ServiceResult<Transaction> {
        store
            .find_transaction(user_id, id)?
            .filter(|txn| !txn.is_deleted())
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> FinanceError {
    FinanceError::NotFound(format!("transaction {}", id))
}
