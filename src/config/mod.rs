//! Configuration module for sbom-assembler.
//!
//! This module provides:
//! - Edit request types ([`EditConfig`]: search spec, policy, field values)
//! - Merge configuration ([`MergeConfig`]) loadable from YAML
//! - Config file discovery
//! - Validation for all configuration values
//!
//! # Configuration File
//!
//! Place a `.sbom-assembler.yaml` file in your project root or
//! `~/.config/sbom-assembler/`:
//!
//! ```yaml
//! app:
//!   name: my-product
//!   version: "1.0.0"
//! input:
//!   files: [a.spdx.json, b.spdx.json]
//! output:
//!   file: merged.spdx.json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    generate_example_config, DATA_LICENSE, DEFAULT_LICENSE_LIST_VERSION, NAMESPACE_PREFIX,
    SPDX_VERSION,
};
pub use file::{discover_config_file, load_config_file, load_or_default, ConfigFileError};
pub use types::{
    AppMetadata, AssembleConfig, EditConfig, FieldValues, HashSpec, InputConfig, LicenseSpec,
    MergeConfig, NameValue, OutputConfig, OutputFormat, SearchSpec, Subject, ToolIdentity,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the merge configuration file format.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(MergeConfig);
    serde_json::to_string_pretty(&schema)
}
