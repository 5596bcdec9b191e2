//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod edit;
mod merge;

pub use edit::run_edit;
pub use merge::run_merge;

use crate::config::{ConfigError, Validatable};
use anyhow::{bail, Result};

/// Fail with every validation error listed.
fn ensure_valid(config: &impl Validatable, what: &str) -> Result<()> {
    let errors: Vec<ConfigError> = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        tracing::error!("{}", error);
    }
    let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("Invalid {what} configuration: {}", listed.join("; "))
}
