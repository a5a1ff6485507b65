//! Logging initialization.
//!
//! The terminal belongs to the viewer while it runs, so logs go to a file. Without a
//! log file no subscriber is installed and `tracing` calls cost next to nothing.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the verbosity-derived filter.
pub const LOG_ENV: &str = "WAYMARK_LOG";

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the global tracing subscriber, writing to `log_file`.
///
/// If `WAYMARK_LOG` is set it takes precedence over `verbosity`. Uses `try_init()`
/// so calling this more than once (e.g. in tests) is safe.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(verbosity >= 2)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
