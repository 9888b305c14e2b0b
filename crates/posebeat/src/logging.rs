use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "posebeat.log";

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "posebeat=debug,posebeat_rule=debug,warn"
    } else {
        "posebeat=info,posebeat_rule=info,warn"
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr, and additionally to a daily-rolling file under
/// `log_dir` when one is given. The returned guard flushes the file writer
/// and must be held until shutdown.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    let registry = tracing_subscriber::registry().with(filter);
    let stderr = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        registry
            .with(stderr)
            .try_init()
            .context("installing log subscriber")?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    registry
        .with(stderr)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("installing log subscriber")?;
    Ok(Some(guard))
}
