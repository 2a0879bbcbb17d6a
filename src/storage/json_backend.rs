use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    core::errors::{FinanceError, Result},
    domain::{BudgetGoal, DateInterval, Transaction, TransactionKind},
    utils::paths,
};

use super::{contains_id, goal_matches, transaction_matches, GoalStore, TransactionStore};

pub const DOCUMENT_SCHEMA_VERSION: u32 = 1;
const DOCUMENT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Everything stored for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<BudgetGoal>,
}

impl Default for UserDocument {
    fn default() -> Self {
        Self {
            schema_version: DOCUMENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            goals: Vec::new(),
        }
    }
}

/// Filesystem-backed store keeping one JSON document per user.
#[derive(Debug)]
pub struct JsonStore {
    users_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        let users_dir = paths::users_dir_in(&root);
        fs::create_dir_all(&users_dir)?;
        Ok(Self {
            users_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn document_path(&self, user_id: Uuid) -> PathBuf {
        self.users_dir
            .join(format!("{}.{}", user_id, DOCUMENT_EXTENSION))
    }

    /// Loads a user's document; a user without records reads as empty.
    pub fn load_document(&self, user_id: Uuid) -> Result<UserDocument> {
        let path = self.document_path(user_id);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(UserDocument::default()),
            Err(err) => return Err(err.into()),
        };
        let document: UserDocument = serde_json::from_str(&data)?;
        if document.schema_version > DOCUMENT_SCHEMA_VERSION {
            return Err(FinanceError::UpstreamFailure(format!(
                "{} uses schema {} but only {} is supported",
                path.display(),
                document.schema_version,
                DOCUMENT_SCHEMA_VERSION
            )));
        }
        Ok(document)
    }

    fn save_document(&self, user_id: Uuid, document: &UserDocument) -> Result<()> {
        let path = self.document_path(user_id);
        let json = serde_json::to_string_pretty(document)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(user = %user_id, path = %path.display(), "user document written");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| FinanceError::UpstreamFailure("json store lock poisoned".into()))
    }

    fn update_document<F>(&self, user_id: Uuid, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut UserDocument) -> Result<()>,
    {
        let _guard = self.lock()?;
        let mut document = self.load_document(user_id)?;
        mutator(&mut document)?;
        document.schema_version = DOCUMENT_SCHEMA_VERSION;
        self.save_document(user_id, &document)
    }
}

impl TransactionStore for JsonStore {
    fn fetch_transactions(
        &self,
        user_id: Uuid,
        kind: TransactionKind,
        interval: &DateInterval,
    ) -> Result<Vec<Transaction>> {
        let document = self.load_document(user_id)?;
        Ok(document
            .transactions
            .into_iter()
            .filter(|txn| transaction_matches(txn, user_id, kind, interval))
            .collect())
    }

    fn find_transaction(&self, user_id: Uuid, id: Uuid) -> Result<Option<Transaction>> {
        let document = self.load_document(user_id)?;
        Ok(document.transactions.into_iter().find(|txn| txn.id == id))
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<()> {
        self.update_document(transaction.user_id, |document| {
            if contains_id(document.transactions.as_slice(), transaction.id) {
                return Err(FinanceError::invalid(format!(
                    "transaction {} already exists",
                    transaction.id
                )));
            }
            document.transactions.push(transaction);
            Ok(())
        })
    }

    fn save_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.update_document(transaction.user_id, |document| {
            let slot = document
                .transactions
                .iter_mut()
                .find(|txn| txn.id == transaction.id)
                .ok_or_else(|| FinanceError::NotFound(format!("transaction {}", transaction.id)))?;
            *slot = transaction.clone();
            Ok(())
        })
    }

    fn list_transactions(
        &self,
        user_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<Transaction>> {
        let document = self.load_document(user_id)?;
        Ok(document
            .transactions
            .into_iter()
            .filter(|txn| !txn.is_deleted())
            .filter(|txn| kind.map_or(true, |k| txn.kind == k))
            .collect())
    }
}

impl GoalStore for JsonStore {
    fn fetch_goals(&self, user_id: Uuid, interval: &DateInterval) -> Result<Vec<BudgetGoal>> {
        let document = self.load_document(user_id)?;
        Ok(document
            .goals
            .into_iter()
            .filter(|goal| goal_matches(goal, user_id, interval))
            .collect())
    }

    fn find_goal(&self, user_id: Uuid, id: Uuid) -> Result<Option<BudgetGoal>> {
        let document = self.load_document(user_id)?;
        Ok(document.goals.into_iter().find(|goal| goal.id == id))
    }

    fn insert_goal(&self, goal: BudgetGoal) -> Result<()> {
        self.update_document(goal.user_id, |document| {
            if contains_id(document.goals.as_slice(), goal.id) {
                return Err(FinanceError::invalid(format!("goal {} already exists", goal.id)));
            }
            document.goals.push(goal);
            Ok(())
        })
    }

    fn save_goal(&self, goal: &BudgetGoal) -> Result<()> {
        self.update_document(goal.user_id, |document| {
            let slot = document
                .goals
                .iter_mut()
                .find(|existing| existing.id == goal.id)
                .ok_or_else(|| FinanceError::NotFound(format!("goal {}", goal.id)))?;
            *slot = goal.clone();
            Ok(())
        })
    }

    fn list_goals(&self, user_id: Uuid) -> Result<Vec<BudgetGoal>> {
        let document = self.load_document(user_id)?;
        Ok(document
            .goals
            .into_iter()
            .filter(|goal| !goal.is_deleted())
            .collect())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
