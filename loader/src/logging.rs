//! Diagnostic logging for the loader binary.
//!
//! Library code logs through the `log` facade. The binary installs a
//! `tracing-subscriber` formatter on stderr, which also receives `log`
//! records, so stdout carries only the success line.

use tracing_subscriber::EnvFilter;

/// Return the filter directive used when `RUST_LOG` is not set.
///
/// # Examples
///
/// ```
/// use service_loader::logging::default_filter;
///
/// assert_eq!(default_filter(0, false), "warn");
/// assert_eq!(default_filter(0, true), "error");
/// assert_eq!(default_filter(2, false), "debug");
/// ```
#[must_use]
pub fn default_filter(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags. Installing twice
/// is harmless; the first subscriber stays in place.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity, quiet)));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        // A subscriber is already installed.
    }
}
