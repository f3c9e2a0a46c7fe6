use crate::logging::context::ExecutionContext;
use serde::Deserialize;
use std::fmt;
use std::io;
use std::str::FromStr;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Console sink for diagnostics.
///
/// Stdout is reserved for command output (the transform report, converter listings),
/// so diagnostics go to stderr or nowhere.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleOutput {
    #[default]
    Stderr,
    None,
}

/// Line format of console diagnostics.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    #[default]
    Text,
    /// One JSON object per event, for agents that ship stderr to a collector.
    Json,
}

impl fmt::Display for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConsoleOutput::Stderr => "stderr",
            ConsoleOutput::None => "none",
        })
    }
}

impl FromStr for ConsoleOutput {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stderr" => Ok(ConsoleOutput::Stderr),
            "none" | "off" => Ok(ConsoleOutput::None),
            "stdout" => Err(
                "logging.console_output cannot be stdout; stdout carries command output".to_string(),
            ),
            other => Err(format!(
                "invalid logging.console_output '{}'; expected stderr or none",
                other
            )),
        }
    }
}

impl FromStr for ConsoleFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ConsoleFormat::Text),
            "json" => Ok(ConsoleFormat::Json),
            other => Err(format!(
                "invalid logging.console_format '{}'; expected text or json",
                other
            )),
        }
    }
}

/// Remote agents stay quiet unless configured; local runs log to stderr.
pub fn select_console_output(
    context: ExecutionContext,
    configured: Option<ConsoleOutput>,
) -> ConsoleOutput {
    configured.unwrap_or(if context.disables_console() {
        ConsoleOutput::None
    } else {
        ConsoleOutput::Stderr
    })
}

/// Stderr layer in the requested format, or `None` when the console is off.
pub fn console_layer<S>(
    output: ConsoleOutput,
    format: ConsoleFormat,
) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if output == ConsoleOutput::None {
        return None;
    }

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    Some(match format {
        ConsoleFormat::Text => layer.with_ansi(false).without_time().boxed(),
        ConsoleFormat::Json => layer.json().with_current_span(false).boxed(),
    })
}
