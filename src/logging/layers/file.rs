use crate::logging::config::LoggingConfig;
use crate::Result;
use anyhow::{anyhow, Context};
use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

const LOG_FILE_NAME: &str = "nodeshare.log";
const STATE_DIR: &str = ".nodeshare";

/// Where the log file goes.
///
/// A relative `log_dir` is joined to the workspace (or home when there is none) and
/// must stay below it once `..` components and existing symlinks are resolved.
pub fn log_file_path(config: &LoggingConfig, workspace_root: Option<&Path>) -> Result<PathBuf> {
    let anchor = match workspace_root {
        Some(workspace) => workspace.to_path_buf(),
        None => dirs_next::home_dir().ok_or_else(|| anyhow!("$HOME directory unavailable"))?,
    };

    let directory = match &config.log_dir {
        Some(custom) if custom.is_absolute() => custom.clone(),
        Some(custom) => {
            let anchor = resolve_existing_prefix(&anchor);
            let candidate = resolve_existing_prefix(&anchor.join(custom));
            if !candidate.starts_with(&anchor) {
                return Err(anyhow!(
                    "logging.log_dir '{}' resolves to {}, outside {}",
                    custom.display(),
                    candidate.display(),
                    anchor.display()
                ));
            }
            candidate
        }
        None => anchor.join(STATE_DIR).join("logs"),
    };
    Ok(directory.join(LOG_FILE_NAME))
}

/// Open `log_file` for appending and wrap it in a non-blocking plain-text layer.
pub fn file_layer<S>(log_file: &Path) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if let Some(directory) = log_file.parent() {
        fs::create_dir_all(directory)
            .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .boxed();
    Ok((layer, guard))
}

/// Canonicalize the deepest ancestor that exists and append the rest lexically.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let lexical = normalize_lexically(path);
    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(resolved) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(resolved, |acc: PathBuf, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return lexical,
        }
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
