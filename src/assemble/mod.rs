//! Merging several documents into one.
//!
//! The hierarchical merge synthesizes a root component from application
//! metadata, re-parents every input's described components under it, and
//! carries all other content through unchanged:
//!
//! ```text
//! init -> synthesize-root -> ingest (per input) -> finalize -> serialize
//! ```
//!
//! The flat merge mode is declared but not implemented.

mod engine;
pub mod license_list;
mod root;

pub use engine::{MergeEngine, MergeMode, MergeReport, MergeStage};
pub use root::synthesize_root;
