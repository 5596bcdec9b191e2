//! Merge command handler.
//!
//! Implements the `merge` subcommand: load every input, build the merged
//! document, write it once.

use crate::assemble::{MergeEngine, MergeMode, MergeReport};
use crate::config::{MergeConfig, ToolIdentity};
use crate::pipeline::{load_inputs, OutputTarget};
use anyhow::{Context, Result};

/// Run the merge command
pub fn run_merge(config: &MergeConfig, tool: ToolIdentity, quiet: bool) -> Result<MergeReport> {
    super::ensure_valid(config, "merge")?;

    let mode = if config.assemble.flat_merge {
        MergeMode::Flat
    } else {
        MergeMode::Hierarchical
    };
    // the flat merge fails before any input is read
    let inputs = match mode {
        MergeMode::Flat => Vec::new(),
        MergeMode::Hierarchical => load_inputs(&config.input.files, quiet)?,
    };

    let target = OutputTarget::from_option(config.output.file.clone());
    let engine = MergeEngine::new(config.app.clone(), tool);
    let report = engine
        .run(&inputs, mode, &target, config.output.format())
        .with_context(|| format!("Failed to merge {} SBOMs", config.input.files.len()))?;

    if !quiet {
        report.log_summary();
    }
    Ok(report)
}
