//! Structured logging setup shared by the CLI and tests.
//!
//! Logs always go to stderr so event lines on stdout stay machine-readable.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that replaces any level given on the command line
pub const LOG_ENV: &str = "PATHSCOPE_LOG";

const CRATES: [&str; 2] = ["pathscope", "pathscope_core"];

/// Log elapsed time since `$start` at trace level.
///
/// ```rust,ignore
/// let start = Instant::now();
/// trace_time!(start, "trace_complete");
/// trace_time!(start, "trace_complete", events = count);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Filter directives for a CLI level.
///
/// A bare level (`info`) applies to both pathscope crates; anything with a
/// target (`pathscope_core::algos=trace`) is passed through untouched.
pub fn directives(verbose: bool, log_level: Option<&str>) -> String {
    let level = match log_level {
        Some(level) if level.contains('=') => return level.to_string(),
        Some(level) => level,
        None if verbose => "debug",
        None => "warn",
    };
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber: compact text, or JSON lines with span
/// open/close records when `log_json` is set.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(directives(verbose, log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        let layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    }
    Ok(())
}
