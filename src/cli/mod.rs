pub mod args;
pub mod commands;

pub use args::{ConvertersArgs, TransformArgs};
use clap::{Parser, Subcommand};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "nodeshare")]
#[command(version = crate::VERSION)]
#[command(about = "Turn orchestrator node definitions into shared, policy-enforced nodes")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Every node produced is exclusive, runs a single executor, and is released after one use."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Convert a node definition file into a shared node",
        long_about = "Transform runs the configured converters in priority order, applies the shared node policy, and prints the resulting node together with the pre-approved launch commands.",
        after_help = "Example:\n    nodeshare transform nodes/solaris1.xml"
    )]
    Transform(TransformArgs),
    #[command(
        about = "List registered converters in priority order",
        long_about = "Converters shows which definition formats are understood and the order in which converters are consulted.",
        after_help = "Example:\n    nodeshare converters --workspace ./pool"
    )]
    Converters(ConvertersArgs),
}

impl Command {
    /// Workspace passed with `--workspace`, if any.
    pub fn workspace(&self) -> Option<&Path> {
        match self {
            Command::Transform(args) => args.workspace.as_deref(),
            Command::Converters(args) => args.workspace.as_deref(),
        }
    }
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Transform(transform_args) => commands::transform(transform_args),
        Command::Converters(converters_args) => commands::converters(converters_args),
    }
}
