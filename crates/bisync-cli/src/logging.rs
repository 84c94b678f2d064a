use std::env;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber: stdout always, plus a plain-text file layer when
/// `logfile` is given. The returned guard must live until the process exits so the
/// file writer gets flushed.
pub fn init_logger(
    logfile: Option<&Path>,
    rolling: bool,
    debug: bool,
) -> anyhow::Result<Option<WorkerGuard>> {
    let default_filter = if debug { "debug" } else { "info" };
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| default_filter.to_string());
    let filter_layer = EnvFilter::try_new(filter)?;

    let (file_layer, guard) = match logfile {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("invalid logfile path {}", path.display()))?;
            let file_appender = if rolling {
                tracing_appender::rolling::daily(directory, file_name)
            } else {
                tracing_appender::rolling::never(directory, file_name)
            };
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_target(false)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .with_ansi(true),
        )
        .with(file_layer)
        .with(filter_layer)
        .try_init()?;

    if let Some(path) = logfile {
        info!(
            "Logging to {}{}",
            if rolling { "rolling logfile " } else { "" },
            path.display()
        );
    }

    Ok(guard)
}
