//! Tracing setup shared by both binaries.
//!
//! Logs always go to stderr; stdout is reserved for the workflow contract.

use tracing_subscriber::{EnvFilter, fmt};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Default filter directive for a verbosity count (`-v`, `-vv`)
pub fn filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "shellcheck_diff=info",
        1 => "shellcheck_diff=debug",
        _ => "shellcheck_diff=trace",
    }
}

/// Install the global subscriber; `RUST_LOG` wins over `verbose`
pub fn init_tracing(verbose: u8, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(verbose)));

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
