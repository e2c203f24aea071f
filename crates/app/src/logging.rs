//! Log subscriber setup.
//!
//! Logs go to stderr; stdout carries the transformed documents.

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_LEVEL: Level = Level::WARN;

/// Installs the global subscriber.
///
/// An explicit `log_level` wins over `RUST_LOG`.
pub fn setup_logging(log_level: Option<Level>) -> Result<(), Box<dyn std::error::Error>> {
    let builder =
        EnvFilter::builder().with_default_directive(log_level.unwrap_or(DEFAULT_LOG_LEVEL).into());
    let env_filter = if log_level.is_some() {
        builder.parse_lossy("")
    } else {
        builder.from_env_lossy()
    };

    let use_color = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_ansi(use_color)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
