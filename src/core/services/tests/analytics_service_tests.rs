use std::sync::atomic::Ordering;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use super::{at, BrokenTotalsStore, FailingStore};
use crate::core::errors::FinanceError;
use crate::core::services::{AnalyticsService, PeriodQuery};
use crate::core::time::FixedClock;
use crate::domain::{DateInterval, PeriodToken, Transaction, TransactionKind};
use crate::storage::MemoryStore;

fn expense(user: Uuid, y: i32, m: u32, d: u32, amount: f64) -> Transaction {
    Transaction::new(user, TransactionKind::Expense, amount, at(y, m, d))
}

#[test]
fn weekly_report_matches_worked_example() {
    let user = Uuid::new_v4();
    let store = MemoryStore::with_records(
        vec![
            expense(user, 2024, 6, 5, 20.0).with_category("Food"),
            expense(user, 2024, 6, 8, 30.0).with_category("Fuel"),
            expense(user, 2024, 5, 30, 100.0),
        ],
        Vec::new(),
    );
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap());

    let report = AnalyticsService::expense_stats(
        &store,
        &clock,
        user,
        &PeriodQuery::named(PeriodToken::Weekly),
    )
    .expect("stats");

    let expected = DateInterval::for_days(
        NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
    )
    .unwrap();
    assert_eq!(report.interval, expected);
    assert_eq!(report.stats.total_spent, 50.0);
    assert!((report.stats.daily_average - 7.142857).abs() < 1e-5);
    assert_eq!(report.stats.trend.len(), 7);
    assert_eq!(report.velocity.percent_change, Some(-50.0));
    assert_eq!(report.velocity.message, "spending 50% less than last week");
    assert_eq!(report.tracking_streak, 1);
    assert_eq!(
        report.previous_interval.map(|prev| prev.first_day()),
        NaiveDate::from_ymd_opt(2024, 5, 28)
    );
}

#[test]
fn missing_history_reports_no_previous_data() {
    let user = Uuid::new_v4();
    let store = MemoryStore::with_records(vec![expense(user, 2024, 6, 9, 100.0)], Vec::new());
    let clock = FixedClock(at(2024, 6, 10));

    let report = AnalyticsService::expense_stats(
        &store,
        &clock,
        user,
        &PeriodQuery::named(PeriodToken::Monthly),
    )
    .unwrap();
    assert_eq!(report.velocity.percent_change, None);
    assert_eq!(report.velocity.message, "no data from previous period");
}

#[test]
fn yearly_report_buckets_by_month() {
    let user = Uuid::new_v4();
    let store = MemoryStore::with_records(
        vec![expense(user, 2024, 1, 15, 10.0), expense(user, 2024, 6, 1, 5.0)],
        Vec::new(),
    );
    let clock = FixedClock(at(2024, 6, 10));

    let report = AnalyticsService::expense_stats(
        &store,
        &clock,
        user,
        &PeriodQuery::named(PeriodToken::Yearly),
    )
    .unwrap();
    assert_eq!(report.stats.trend.len(), 13);
    assert_eq!(report.stats.trend[0].label, "Jun 2023");
    assert_eq!(report.stats.trend[12].label, "Jun 2024");
    assert_eq!(report.stats.trend[12].amount, 5.0);
}

#[test]
fn custom_range_skips_velocity() {
    let user = Uuid::new_v4();
    let store = MemoryStore::with_records(vec![expense(user, 2024, 3, 3, 12.0)], Vec::new());
    let clock = FixedClock(at(2024, 6, 10));
    let query = PeriodQuery::custom(at(2024, 3, 1), at(2024, 3, 5));

    let report = AnalyticsService::expense_stats(&store, &clock, user, &query).unwrap();
    assert!(!report.velocity.available);
    assert!(report.previous_interval.is_none());
    assert_eq!(report.stats.trend.len(), 5);
    assert_eq!(report.stats.total_spent, 12.0);
}

#[test]
fn payments_are_reported_separately() {
    let user = Uuid::new_v4();
    let store = MemoryStore::with_records(
        vec![
            expense(user, 2024, 6, 9, 100.0),
            Transaction::new(user, TransactionKind::Payment, 900.0, at(2024, 6, 1)),
        ],
        Vec::new(),
    );
    let clock = FixedClock(at(2024, 6, 10));

    let report = AnalyticsService::payment_stats(
        &store,
        &clock,
        user,
        &PeriodQuery::named(PeriodToken::Monthly),
    )
    .unwrap();
    assert_eq!(report.kind, TransactionKind::Payment);
    assert_eq!(report.stats.total_spent, 900.0);
}

#[test]
fn validation_happens_before_store_access() {
    let store = FailingStore::default();
    let clock = FixedClock(at(2024, 6, 10));
    let query = PeriodQuery {
        period: PeriodToken::Custom,
        start_date: Some(at(2024, 6, 1)),
        end_date: None,
    };

    let err = AnalyticsService::expense_stats(&store, &clock, Uuid::new_v4(), &query)
        .expect_err("custom period without end must fail");
    assert!(err.is_invalid_argument());
    assert_eq!(store.call_count(), 0);
}

#[test]
fn store_failures_propagate_without_partial_results() {
    let store = FailingStore::default();
    let clock = FixedClock(at(2024, 6, 10));

    let err = AnalyticsService::expense_stats(
        &store,
        &clock,
        Uuid::new_v4(),
        &PeriodQuery::named(PeriodToken::Weekly),
    )
    .expect_err("store failure must surface");
    assert!(matches!(err, FinanceError::UpstreamFailure(_)));
    assert_eq!(store.call_count(), 1);
}

#[test]
fn failing_previous_total_returns_no_report() {
    let user = Uuid::new_v4();
    let store = BrokenTotalsStore::new(MemoryStore::with_records(
        vec![expense(user, 2024, 6, 9, 40.0)],
        Vec::new(),
    ));
    let clock = FixedClock(at(2024, 6, 10));

    let result = AnalyticsService::expense_stats(
        &store,
        &clock,
        user,
        &PeriodQuery::named(PeriodToken::Monthly),
    );
    assert!(matches!(result, Err(FinanceError::UpstreamFailure(_))));
    assert_eq!(store.total_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unshiftable_period_fails_before_store_access() {
    let store = FailingStore::default();
    let clock = FixedClock(DateTime::<Utc>::MIN_UTC + Duration::days(6));

    let err = AnalyticsService::expense_stats(
        &store,
        &clock,
        Uuid::new_v4(),
        &PeriodQuery::named(PeriodToken::Weekly),
    )
    .expect_err("previous week lies before the earliest representable date");
    assert!(err.is_invalid_argument());
    assert_eq!(store.call_count(), 0);
}
