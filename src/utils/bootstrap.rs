//! Process setup shared by test harnesses.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "FINERACT_E2E_LOG";

/// Initialize tracing with the FINERACT_E2E_LOG environment variable.
///
/// Defaults to "info" level if FINERACT_E2E_LOG is not set. Later calls are
/// ignored, so every harness entry point may call it.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
