//! Analytics calculators, the error type and request-level services.

pub mod aggregation;
pub mod errors;
pub mod period_range;
pub mod services;
pub mod time;
pub mod velocity;

pub use aggregation::{aggregate, tracking_streak};
pub use errors::{FinanceError, Result};
pub use period_range::{compute_range, shift_interval_back};
pub use time::{Clock, FixedClock, SystemClock};
pub use velocity::compare;
