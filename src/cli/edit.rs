//! Edit command handler.
//!
//! Implements the `edit` subcommand: load one document, apply field edits
//! to the resolved subject, write the result.

use crate::config::{EditConfig, OutputFormat, ToolIdentity};
use crate::edit::{EditEngine, EditReport, FieldOutcome};
use crate::pipeline::{parse_document_with_context, write_document, OutputTarget};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the edit command
pub fn run_edit(
    input: &Path,
    target: &OutputTarget,
    format: OutputFormat,
    config: EditConfig,
    tool: ToolIdentity,
    quiet: bool,
) -> Result<EditReport> {
    super::ensure_valid(&config, "edit")?;

    let mut doc = parse_document_with_context(input, quiet)?;
    let engine = EditEngine::new(config, tool);
    let report = engine.update(&mut doc);

    if !quiet {
        let not_supported = report
            .outcomes
            .iter()
            .filter(|(_, o)| matches!(o, FieldOutcome::NotSupported(_)))
            .count();
        tracing::info!(
            "Edited {} ({}): {} fields written, {} not supported",
            input.display(),
            report.subject,
            report.applied_count(),
            not_supported
        );
    }

    write_document(&doc, target, format)
        .with_context(|| format!("Failed to write edited SBOM to {target}"))?;
    Ok(report)
}
