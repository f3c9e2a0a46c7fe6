//! Utility helpers: loading node definitions from disk for the CLI.
pub mod files;

pub use files::DefinitionFileLoader;
