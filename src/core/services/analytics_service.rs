//! Period statistics for expenses and payments.

use uuid::Uuid;

use crate::core::{
    aggregation::{aggregate, tracking_streak},
    period_range::shift_interval_back,
    time::Clock,
    velocity::compare,
};
use crate::domain::{StatsReport, TransactionKind, VelocityResult};
use crate::storage::TransactionStore;

use super::{PeriodQuery, ServiceResult};

/// Stateless analytics entry points; dependencies are passed per request.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Builds the dashboard report for `kind` over the requested period.
    ///
    /// Both the current and the previous interval are resolved before the store is touched.
    /// Named periods are compared against their predecessor; custom ranges carry the
    /// unavailable velocity sentinel.
    pub fn get_stats_by_period(
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        user_id: Uuid,
        kind: TransactionKind,
        query: &PeriodQuery,
    ) -> ServiceResult<StatsReport> {
        let period = query.period;
        let interval = query.resolve(clock.now())?;
        tracing::debug!(user = %user_id, %kind, %period, %interval, "computing period stats");

        let previous_interval = if period.is_custom() {
            None
        } else {
            Some(shift_interval_back(&interval, period)?)
        };

        let transactions = store.fetch_transactions(user_id, kind, &interval)?;
        let stats = aggregate(&transactions, &interval, period.bucketing());
        let streak = tracking_streak(&transactions, &interval);

        let velocity = match previous_interval {
            None => VelocityResult::not_available(),
            Some(previous) => {
                let previous_total = store.fetch_period_total(user_id, kind, &previous)?;
                tracing::debug!(
                    user = %user_id,
                    previous = %previous,
                    previous_total,
                    current_total = stats.total_spent,
                    "comparing against previous period"
                );
                compare(period, stats.total_spent, previous_total)
            }
        };

        Ok(StatsReport {
            period,
            kind,
            interval,
            previous_interval,
            stats,
            velocity,
            tracking_streak: streak,
        })
    }

    /// Expense statistics; shorthand for [`AnalyticsService::get_stats_by_period`].
    pub fn expense_stats(
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        user_id: Uuid,
        query: &PeriodQuery,
    ) -> ServiceResult<StatsReport> {
        Self::get_stats_by_period(store, clock, user_id, TransactionKind::Expense, query)
    }

    pub fn payment_stats(
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        user_id: Uuid,
        query: &PeriodQuery,
    ) -> ServiceResult<StatsReport> {
        Self::get_stats_by_period(store, clock, user_id, TransactionKind::Payment, query)
    }
}
