//! **A library for editing and assembling SPDX Software Bills of Materials.**
//!
//! `sbom-assembler` loads SPDX 2.x documents (JSON or YAML), edits their
//! metadata in place, and merges several documents into one under a newly
//! synthesized root component. It powers both a command-line interface and a
//! Rust library for programmatic use.
//!
//! ## Key Features
//!
//! - **Field Editing**: Update name, version, supplier, authors, purl, CPE,
//!   licenses, hashes, tools, copyright, lifecycle, description, repository
//!   and primary purpose on the document or on one of its components, under
//!   a `missing`, `append` or `overwrite` policy.
//! - **Hierarchical Merge**: Combine documents under one root component,
//!   re-identifying every described component and rewriting the relationships
//!   that referenced it.
//! - **Lossless Round-Trip**: Keys the engines do not act on are preserved.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The in-memory [`Document`] and its [`Component`]s,
//!   relationships and creation info.
//! - **[`edit`]**: The [`EditEngine`], its subject resolver and the ordered
//!   field-handler table.
//! - **[`assemble`]**: The [`MergeEngine`] and license-list reconciliation.
//! - **[`parsers`]** / **[`pipeline`]**: Loading and writing documents.
//! - **[`config`]**: Edit requests, merge configuration files and validation.
//!
//! ## Getting Started: Merging Documents
//!
//! ```no_run
//! use sbom_assembler::assemble::{MergeEngine, MergeMode};
//! use sbom_assembler::config::{AppMetadata, ToolIdentity};
//! use sbom_assembler::parsers::load_document;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let inputs = vec![
//!         load_document(Path::new("frontend.spdx.json"))?,
//!         load_document(Path::new("backend.spdx.json"))?,
//!     ];
//!     let app = AppMetadata {
//!         name: "product".to_string(),
//!         version: "1.0.0".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let engine = MergeEngine::new(app, ToolIdentity::new("my-tool", "1.0"));
//!     let (merged, report) = engine.merge(&inputs, MergeMode::Hierarchical)?;
//!     println!("{} components from {} inputs", merged.component_count(), report.inputs);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

pub mod assemble;
pub mod cli;
pub mod config;
pub mod edit;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod utils;

// Re-export main types for convenience
pub use assemble::{MergeEngine, MergeMode, MergeReport, MergeStage};
pub use config::{ConfigError, Validatable};
pub use config::{EditConfig, MergeConfig, ToolIdentity};
pub use edit::{EditEngine, EditReport, FieldHandler, FieldOutcome, Policy};
pub use error::{AssemblerError, ErrorContext, Result};
pub use model::{Component, Document, Relationship};
pub use parsers::{load_document, parse_document_str};
