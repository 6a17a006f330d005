//! # Crosswire Telemetry
//!
//! Structured logging for Crosswire processes, built on `tracing`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crosswire_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CROSSWIRE_SERVICE_NAME` | `crosswire` | Service name attached to logs |
//! | `CROSSWIRE_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `CROSSWIRE_JSON_LOGS` | `false` | JSON output instead of pretty text |
//! | `CROSSWIRE_CONSOLE_OUTPUT` | `true` | Write logs to stderr at all |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Convenience macro for creating a span tagged with a channel.
///
/// # Example
///
/// ```rust,ignore
/// use crosswire_telemetry::channel_span;
///
/// let _span = channel_span!("relay", "prices").entered();
/// ```
#[macro_export]
macro_rules! channel_span {
    ($name:expr, $channel:expr) => {
        tracing::info_span!($name, channel = %$channel)
    };
    ($name:expr, $channel:expr, $($field:tt)*) => {
        tracing::info_span!($name, channel = %$channel, $($field)*)
    };
}
