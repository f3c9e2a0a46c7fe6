use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct TransformArgs {
    /// Node definition file to convert
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Definition format tag; defaults to the file extension
    #[arg(long, value_name = "TAG")]
    pub format: Option<String>,

    /// Directory holding nodeshare.toml (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConvertersArgs {
    /// Directory holding nodeshare.toml (defaults to current directory)
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,
}
