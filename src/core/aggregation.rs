//! Spending aggregation over a date interval.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::domain::{
    period::{Bucketing, DateInterval},
    stats::{CategoryTotal, PeriodStats, TrendPoint},
    transaction::Transaction,
};

/// Summarizes the live transactions that fall inside `interval`.
///
/// Soft-deleted records and records dated outside the interval are skipped even when the
/// caller already filtered them. Trend buckets are zero-initialized so that every day (or
/// month) of the interval is present.
pub fn aggregate(
    transactions: &[Transaction],
    interval: &DateInterval,
    bucketing: Bucketing,
) -> PeriodStats {
    let mut trend = empty_trend(interval, bucketing);
    let mut categories = CategoryAccumulator::default();
    let mut total_spent = 0.0;
    let mut transaction_count = 0usize;

    for txn in counted(transactions, interval) {
        let amount = txn.effective_amount();
        total_spent += amount;
        transaction_count += 1;
        categories.add(txn.category_label(), amount);
        if let Some(slot) = bucket_index(interval, bucketing, txn).and_then(|i| trend.get_mut(i)) {
            slot.amount += amount;
        }
    }

    PeriodStats {
        total_spent,
        daily_average: total_spent / interval.day_count().max(1) as f64,
        trend,
        categories: categories.into_sorted(),
        transaction_count,
    }
}

/// Longest run of consecutive calendar days in `interval` with at least one transaction.
pub fn tracking_streak(transactions: &[Transaction], interval: &DateInterval) -> u32 {
    let days: BTreeSet<NaiveDate> = counted(transactions, interval)
        .map(|txn| txn.date.date_naive())
        .collect();

    let mut longest = 0u32;
    let mut current = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for day in days {
        current = match previous.and_then(|prev| prev.succ_opt()) {
            Some(expected) if expected == day => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }
    longest
}

fn counted<'a>(
    transactions: &'a [Transaction],
    interval: &'a DateInterval,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions
        .iter()
        .filter(move |txn| !txn.is_deleted() && interval.contains(txn.date))
}

fn empty_trend(interval: &DateInterval, bucketing: Bucketing) -> Vec<TrendPoint> {
    match bucketing {
        Bucketing::Daily => (1..=interval.day_count())
            .map(|n| TrendPoint {
                label: format!("Day {}", n),
                amount: 0.0,
            })
            .collect(),
        Bucketing::Monthly => {
            let first = month_index(interval.first_day());
            let last = month_index(interval.last_day());
            (first..=last)
                .filter_map(month_start)
                .map(|month| TrendPoint {
                    label: month.format("%b %Y").to_string(),
                    amount: 0.0,
                })
                .collect()
        }
    }
}

fn bucket_index(interval: &DateInterval, bucketing: Bucketing, txn: &Transaction) -> Option<usize> {
    match bucketing {
        Bucketing::Daily => interval.day_index(txn.date),
        Bucketing::Monthly => {
            let offset = month_index(txn.date.date_naive()) - month_index(interval.first_day());
            usize::try_from(offset).ok()
        }
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_start(index: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// Sums per category while remembering first-seen order so that ties stay stable.
#[derive(Default)]
struct CategoryAccumulator {
    order: Vec<CategoryTotal>,
    positions: HashMap<String, usize>,
}

impl CategoryAccumulator {
    fn add(&mut self, label: &str, amount: f64) {
        match self.positions.get(label) {
            Some(&index) => self.order[index].amount += amount,
            None => {
                self.positions.insert(label.to_string(), self.order.len());
                self.order.push(CategoryTotal {
                    category: label.to_string(),
                    amount,
                });
            }
        }
    }

    fn into_sorted(mut self) -> Vec<CategoryTotal> {
        self.order.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        self.order
    }
}
