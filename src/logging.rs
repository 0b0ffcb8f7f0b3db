//! Diagnostic logging via `tracing`.
//!
//! Diagnostics go to stderr so they never mix with command output on stdout.
//! `TR_CODER_LOG` takes an `EnvFilter` directive and overrides `-v`;
//! `TR_CODER_LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "TR_CODER_LOG";
pub const LOG_FORMAT_ENV: &str = "TR_CODER_LOG_FORMAT";

/// Level used when `TR_CODER_LOG` is unset.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

fn json_requested() -> bool {
    std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    let base_subscriber = Registry::default().with(build_env_filter(verbosity));

    if json_requested() {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    }
}
