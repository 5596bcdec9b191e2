//! In-memory representation of BOM documents.
//!
//! The model mirrors the SPDX 2.3 JSON layout: a [`Document`] owns ordered
//! lists of [`Component`]s, file records, [`Relationship`]s and extracted
//! license records, plus [`CreationInfo`]. Closed vocabularies (creator
//! types, checksum algorithms, primary purpose, relationship kinds) are
//! typed; everything the engines never touch is passed through verbatim.

mod document;
mod identifiers;
mod metadata;
mod relationship;

pub use document::*;
pub use identifiers::*;
pub use metadata::*;
pub use relationship::*;
