//! Turns period tokens into concrete date intervals.

use chrono::{DateTime, Duration, Utc};

use crate::core::errors::{FinanceError, Result};
use crate::domain::period::{DateInterval, PeriodToken};

/// Resolves `period` into an inclusive interval relative to `now`.
///
/// Named periods produce an N-day window of whole days ending at the end of `now`'s day.
/// `custom` returns exactly `[explicit_start, explicit_end]`; both bounds are required and
/// explicit bounds are ignored for named periods.
pub fn compute_range(
    period: PeriodToken,
    now: DateTime<Utc>,
    explicit_start: Option<DateTime<Utc>>,
    explicit_end: Option<DateTime<Utc>>,
) -> Result<DateInterval> {
    let Some(days) = period.day_count() else {
        return match (explicit_start, explicit_end) {
            (Some(start), Some(end)) => DateInterval::new(start, end),
            _ => Err(FinanceError::invalid(
                "custom period requires both a start and an end date",
            )),
        };
    };
    let today = now.date_naive();
    let first = today
        .checked_sub_signed(Duration::days(days - 1))
        .ok_or_else(|| out_of_range(period))?;
    DateInterval::for_days(first, today)
}

/// Interval of the same kind immediately preceding `interval`.
///
/// The result has the same length and ends one millisecond before `interval` starts, so
/// the two windows are contiguous. Named windows are whole days, which moves weekly,
/// monthly, quarterly and yearly windows back by 7, 30, 90 and 365 days.
pub fn shift_interval_back(interval: &DateInterval, period: PeriodToken) -> Result<DateInterval> {
    let span = match period.day_count() {
        Some(days) => Duration::days(days),
        None => interval.end - interval.start + Duration::milliseconds(1),
    };
    let end = interval
        .start
        .checked_sub_signed(Duration::milliseconds(1))
        .ok_or_else(|| out_of_range(period))?;
    let start = interval
        .start
        .checked_sub_signed(span)
        .ok_or_else(|| out_of_range(period))?;
    DateInterval::new(start, end)
}

fn out_of_range(period: PeriodToken) -> FinanceError {
    FinanceError::invalid(format!(
        "{} period falls outside the supported date range",
        period
    ))
}
