//! Period-over-period spending comparison.

use crate::domain::{period::PeriodToken, stats::VelocityResult};

/// Percent changes strictly inside this band read as "similar".
pub const SIMILAR_THRESHOLD: f64 = 5.0;

pub const NO_PREVIOUS_DATA: &str = "no data from previous period";

/// Compares `current_total` against the preceding period of the same kind.
pub fn compare(period: PeriodToken, current_total: f64, previous_period_total: f64) -> VelocityResult {
    if period.is_custom() {
        return VelocityResult::not_available();
    }
    if previous_period_total == 0.0 || !previous_period_total.is_finite() {
        return VelocityResult {
            percent_change: None,
            message: NO_PREVIOUS_DATA.into(),
            available: true,
        };
    }

    let percent_change = (current_total - previous_period_total) / previous_period_total * 100.0;
    VelocityResult {
        percent_change: Some(percent_change),
        message: describe(period, percent_change),
        available: true,
    }
}

fn describe(period: PeriodToken, percent_change: f64) -> String {
    let noun = period.noun();
    if percent_change.abs() < SIMILAR_THRESHOLD {
        return format!("similar spending to last {}", noun);
    }
    let rounded = percent_change.abs().round();
    if percent_change > 0.0 {
        format!("spending {}% more than last {}", rounded, noun)
    } else {
        format!("spending {}% less than last {}", rounded, noun)
    }
}
