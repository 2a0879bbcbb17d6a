pub mod paths;

use std::sync::Once;

pub const DEFAULT_LOG_LEVEL: &str = "info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. `level` applies to this crate, other
/// targets follow `RUST_LOG`.
pub fn init_tracing(level: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = format!("finance_core={}", level.trim().to_ascii_lowercase());
        let filter = match directive.parse() {
            Ok(parsed) => EnvFilter::from_default_env().add_directive(parsed),
            Err(_) => EnvFilter::from_default_env().add_directive(
                tracing_subscriber::filter::LevelFilter::INFO.into(),
            ),
        };

        // Logs go to stderr so command output stays machine-readable.
        // A subscriber installed by the host process takes precedence.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
