//! Tracing subscriber setup for the taskpulse binary.
//!
//! Logs go to stderr so JSON on stdout stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::TaskpulseError;

/// Filter directives for a `-v` count.
#[must_use]
pub const fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "taskpulse=warn",
        1 => "taskpulse=info",
        _ => "taskpulse=debug",
    }
}

fn build_filter(verbosity: u8) -> Result<EnvFilter, TaskpulseError> {
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directives(0)))
    } else {
        EnvFilter::try_new(default_directives(verbosity))
    };
    filter.map_err(|e| TaskpulseError::Config(format!("Invalid log filter: {e}")))
}

/// Install the global subscriber.
///
/// `RUST_LOG` is honoured unless `-v` was given, which takes precedence.
///
/// # Errors
///
/// Returns an error if `RUST_LOG` cannot be parsed or a subscriber is
/// already installed.
pub fn init_logging(verbosity: u8) -> Result<(), TaskpulseError> {
    tracing_subscriber::registry()
        .with(build_filter(verbosity)?)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| TaskpulseError::Config(format!("Failed to initialise logging: {e}")))
}
