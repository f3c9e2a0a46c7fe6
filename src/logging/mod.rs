//! Process-wide diagnostics.
//!
//! Stdout belongs to command output, so every sink here writes either to the log
//! file or to stderr. A transform report piped into another tool never contains
//! log lines.

pub mod config;
pub mod context;
pub mod layers;

pub use context::ExecutionContext;
pub use layers::console::{ConsoleFormat, ConsoleOutput};

use crate::logging::config::LoggingConfig;
use crate::logging::layers::{console, file};
use crate::Result;
use anyhow::{anyhow, Context};
use std::env;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

/// Keeps the file writer flushing until the command finishes.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber for a command run against `workspace`.
///
/// `RUST_LOG` takes precedence over `logging.default_level`. Fails if a global
/// subscriber is already set.
pub fn init(workspace: Option<&Path>) -> Result<LoggingGuard> {
    let workspace = match workspace {
        Some(path) => Some(path.to_path_buf()),
        None => env::current_dir().ok(),
    };
    let config = LoggingConfig::load(workspace.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let (file_guard, log_file_path) = if config.enable_file {
        let path = file::log_file_path(&config, workspace.as_deref())?;
        let (layer, guard) = file::file_layer::<Registry>(&path)?;
        layers.push(layer);
        (Some(guard), Some(path))
    } else {
        (None, None)
    };

    let console_output =
        console::select_console_output(ExecutionContext::detect(), config.console_output);
    if let Some(layer) = console::console_layer::<Registry>(console_output, config.console_format)
    {
        layers.push(layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|err| anyhow!("logging already initialized: {}", err))?;

    tracing::debug!(
        console = %console_output,
        log_file = ?log_file_path,
        "logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
