use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.replog/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.replog/`
/// - `~/.replog/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let replog_dir = home.join(".replog");
    std::fs::create_dir_all(&replog_dir)?;
    std::fs::create_dir_all(replog_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised. All output
/// goes to stderr so it never interleaves with the report surface on stdout.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => return setup_logging_raw(&other.to_lowercase()),
    };
    setup_logging_raw(normalised)
}

fn setup_logging_raw(directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Workbook discovery ─────────────────────────────────────────────────────────

/// Attempt to locate the workbook directory when `--workbook` is not given.
///
/// Checks the following in order and returns the first that exists:
/// 1. The `REPLOG_WORKBOOK` environment variable.
/// 2. `~/.replog/workbook/`
/// 3. `./workbook/`
///
/// Returns `None` when nothing matches.
pub fn discover_workbook() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("REPLOG_WORKBOOK") {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            return Some(path);
        }
    }

    let mut candidates = Vec::new();
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".replog").join("workbook"));
    }
    candidates.push(PathBuf::from("workbook"));

    candidates.into_iter().find(|p| p.is_dir())
}
