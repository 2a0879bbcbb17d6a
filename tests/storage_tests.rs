mod common;

use std::fs;

use common::{at, temp_base};
use finance_core::{
    core::errors::FinanceError,
    domain::{BudgetGoal, DateInterval, Transaction, TransactionKind},
    storage::{GoalStore, JsonStore, MemoryStore, TransactionStore, DOCUMENT_SCHEMA_VERSION},
};
use uuid::Uuid;

fn june() -> DateInterval {
    DateInterval::new(at(2024, 6, 1), at(2024, 6, 30)).expect("valid interval")
}

#[test]
fn missing_document_reads_as_empty() {
    let store = JsonStore::new(temp_base()).expect("store");
    let user = Uuid::new_v4();
    assert!(store
        .fetch_transactions(user, TransactionKind::Expense, &june())
        .unwrap()
        .is_empty());
    assert_eq!(store.fetch_period_total(user, TransactionKind::Expense, &june()).unwrap(), 0.0);
    assert!(store.list_goals(user).unwrap().is_empty());
}

#[test]
fn records_survive_a_reopen() {
    let root = temp_base();
    let user = Uuid::new_v4();
    let txn = Transaction::new(user, TransactionKind::Expense, 12.5, at(2024, 6, 3))
        .with_category("Coffee");
    let goal = BudgetGoal::new(user, "Laptop", 1200.0, at(2024, 9, 1)).with_created_at(at(2024, 6, 2));

    {
        let store = JsonStore::new(root.clone()).expect("store");
        store.insert_transaction(txn.clone()).unwrap();
        store.insert_goal(goal.clone()).unwrap();
    }

    let reopened = JsonStore::new(root).expect("reopen");
    let fetched = reopened
        .fetch_transactions(user, TransactionKind::Expense, &june())
        .unwrap();
    assert_eq!(fetched, vec![txn]);
    assert_eq!(reopened.fetch_goals(user, &june()).unwrap(), vec![goal]);

    let document = reopened.load_document(user).unwrap();
    assert_eq!(document.schema_version, DOCUMENT_SCHEMA_VERSION);
}

#[test]
fn writes_leave_no_temp_file_behind() {
    let store = JsonStore::new(temp_base()).expect("store");
    let user = Uuid::new_v4();
    store
        .insert_transaction(Transaction::new(user, TransactionKind::Payment, 5.0, at(2024, 6, 4)))
        .unwrap();

    let path = store.document_path(user);
    assert!(path.exists());
    let dir = path.parent().expect("users dir");
    let leftovers: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn corrupt_document_is_an_upstream_failure() {
    let store = JsonStore::new(temp_base()).expect("store");
    let user = Uuid::new_v4();
    fs::write(store.document_path(user), "{ not json").unwrap();

    let err = store
        .fetch_transactions(user, TransactionKind::Expense, &june())
        .unwrap_err();
    assert!(matches!(err, FinanceError::UpstreamFailure(_)));
}

#[test]
fn newer_schema_is_refused() {
    let store = JsonStore::new(temp_base()).expect("store");
    let user = Uuid::new_v4();
    let json = format!(
        r#"{{"schema_version": {}, "transactions": [], "goals": []}}"#,
        DOCUMENT_SCHEMA_VERSION + 1
    );
    fs::write(store.document_path(user), json).unwrap();
    assert!(matches!(
        store.list_goals(user),
        Err(FinanceError::UpstreamFailure(_))
    ));
}

#[test]
fn lenient_amounts_load_from_disk() {
    let store = JsonStore::new(temp_base()).expect("store");
    let user = Uuid::new_v4();
    let json = format!(
        r#"{{
  "schema_version": 1,
  "transactions": [
    {{"id": "{a}", "user_id": "{user}", "kind": "expense", "amount": "15.5",
      "date": "2024-06-05T09:00:00Z", "created_at": "2024-06-05T09:00:00Z"}},
    {{"id": "{b}", "user_id": "{user}", "kind": "expense", "amount": "n/a",
      "date": "2024-06-06T09:00:00Z", "created_at": "2024-06-06T09:00:00Z"}},
    {{"id": "{c}", "user_id": "{user}", "kind": "expense",
      "date": "2024-06-07T09:00:00Z", "created_at": "2024-06-07T09:00:00Z"}}
  ]
}}"#,
        a = Uuid::new_v4(),
        b = Uuid::new_v4(),
        c = Uuid::new_v4(),
        user = user,
    );
    fs::write(store.document_path(user), json).unwrap();

    let fetched = store
        .fetch_transactions(user, TransactionKind::Expense, &june())
        .unwrap();
    assert_eq!(fetched.len(), 3);
    assert_eq!(
        store.fetch_period_total(user, TransactionKind::Expense, &june()).unwrap(),
        15.5
    );
}

#[test]
fn backends_agree_on_filtering() {
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();
    let mut deleted = Transaction::new(user, TransactionKind::Expense, 7.0, at(2024, 6, 8));
    deleted.mark_deleted(at(2024, 6, 9));
    let records = vec![
        Transaction::new(user, TransactionKind::Expense, 10.0, at(2024, 6, 2)),
        Transaction::new(user, TransactionKind::Expense, 99.0, at(2024, 7, 2)),
        Transaction::new(user, TransactionKind::Payment, 50.0, at(2024, 6, 3)),
        Transaction::new(other, TransactionKind::Expense, 1.0, at(2024, 6, 3)),
        deleted,
    ];

    let memory = MemoryStore::with_records(records.clone(), Vec::new());
    let json = JsonStore::new(temp_base()).expect("store");
    for txn in records {
        json.insert_transaction(txn).unwrap();
    }

    let stores: [&dyn TransactionStore; 2] = [&memory, &json];
    for store in stores {
        assert_eq!(
            store.fetch_period_total(user, TransactionKind::Expense, &june()).unwrap(),
            10.0
        );
        assert_eq!(store.list_transactions(user, None).unwrap().len(), 3);
        assert_eq!(
            store
                .list_transactions(user, Some(TransactionKind::Payment))
                .unwrap()
                .len(),
            1
        );
    }
}
