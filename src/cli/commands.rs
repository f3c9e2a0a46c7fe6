use crate::{
    cli::args::{ConvertersArgs, TransformArgs},
    core::{
        ApprovalLanguage, ConfigLoader, ConverterRegistry, InMemoryApprovalRegistry,
        NodeshareConfig, SharedNode,
    },
    utils::DefinitionFileLoader,
    Result,
};
use anyhow::Context;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Output printed by `nodeshare transform`.
#[derive(Debug, Serialize)]
pub struct TransformReport {
    pub node: SharedNode,
    pub preapproved_commands: Vec<String>,
}

pub fn transform(args: TransformArgs) -> Result<()> {
    let workspace = resolve_workspace(args.workspace.as_deref())?;
    let config = load_config(&workspace)?;

    let approvals = Arc::new(InMemoryApprovalRegistry::new());
    let registry = ConverterRegistry::from_config(&config, approvals.clone())?;
    let definition = DefinitionFileLoader::new(&config.definitions.default_format)
        .load(&args.file, args.format.as_deref())?;

    let node = registry.transform(definition)?;
    let report = TransformReport {
        node,
        preapproved_commands: approvals.approved_scripts(ApprovalLanguage::SystemCommand),
    };
    let rendered =
        serde_json::to_string_pretty(&report).context("failed to render transform report")?;
    println!("{}", rendered);
    Ok(())
}

pub fn converters(args: ConvertersArgs) -> Result<()> {
    let workspace = resolve_workspace(args.workspace.as_deref())?;
    let config = load_config(&workspace)?;
    let registry =
        ConverterRegistry::from_config(&config, Arc::new(InMemoryApprovalRegistry::new()))?;

    for (priority, name) in registry.converter_names().iter().enumerate() {
        println!("{}. {}", priority + 1, name);
    }
    Ok(())
}

fn resolve_workspace(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => env::current_dir().context("failed to resolve current directory"),
    }
}

fn load_config(workspace: &Path) -> Result<NodeshareConfig> {
    let config = ConfigLoader::load_from_workspace(workspace)?;
    Ok(config)
}
