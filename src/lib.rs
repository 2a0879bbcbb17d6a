#![doc(test(attr(deny(warnings))))]

//! Finance Core provides the analytics and record services behind a personal
//! finance tracker: period ranges, spending aggregation, velocity comparison and
//! budget-goal statistics, plus pluggable storage for transactions and goals.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing at the default level and emits a startup info log.
pub fn init() {
    init_with_level(utils::DEFAULT_LOG_LEVEL);
}

/// Initializes global tracing using the provided level for this crate's events.
pub fn init_with_level(level: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(level);
        tracing::info!("Finance Core tracing initialized.");
    });
}
