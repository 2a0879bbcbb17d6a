pub mod common;
pub mod goal;
pub mod period;
pub mod stats;
pub mod transaction;

pub use common::{Displayable, Identifiable, Owned};
pub use goal::{BudgetGoal, GoalStatus};
pub use period::{end_of_day, start_of_day, Bucketing, DateInterval, PeriodToken};
pub use stats::{
    CategoryTotal, GoalStats, GoalSummary, PeriodStats, StatsReport, StatusCounts, TrendPoint,
    VelocityResult,
};
pub use transaction::{Transaction, TransactionKind, UNCATEGORIZED};
