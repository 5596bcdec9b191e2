//! In-place editing of a loaded document.
//!
//! An edit run resolves a subject (the document, its primary component, or
//! a component found by name and version) and then walks a fixed table of
//! field handlers, applying each configured value under one [`Policy`].
//!
//! # Example
//!
//! ```no_run
//! use sbom_assembler::config::{EditConfig, FieldValues, ToolIdentity};
//! use sbom_assembler::edit::{EditEngine, Policy};
//! use sbom_assembler::parsers::load_document;
//! use std::path::Path;
//!
//! let mut doc = load_document(Path::new("app.spdx.json"))?;
//! let config = EditConfig {
//!     policy: Policy::Missing,
//!     fields: FieldValues {
//!         description: Some("Fleet firmware".to_string()),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let report = EditEngine::new(config, ToolIdentity::new("my-tool", "1.0")).update(&mut doc);
//! println!("{} fields written", report.applied_count());
//! # Ok::<(), sbom_assembler::AssemblerError>(())
//! ```

mod engine;
mod fields;
mod policy;
mod resolver;

pub use engine::{EditEngine, EditReport};
pub use fields::{EditContext, EditTarget, FieldHandler, FieldOutcome, FieldScope};
pub use policy::{Policy, Unset};
pub use resolver::{resolve, ResolveError, Resolved};
