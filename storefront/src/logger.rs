//! Logging setup
//!
//! Console only. `RUST_LOG` wins over the configured level when set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Install the global subscriber
///
/// * `level` - default filter directive, e.g. `"info"` or `"storefront=debug,tower_http=info"`
/// * `json_format` - JSON lines for production, human-readable otherwise
pub fn init_logger(level: &str, json_format: bool) -> Result<(), BoxError> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}
