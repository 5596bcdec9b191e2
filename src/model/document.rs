//! Core document and component data structures.
//!
//! The structures follow the SPDX 2.3 JSON layout so a loaded document can
//! be written back without loss. Keys the engines do not act on are kept in
//! the flattened `extra` maps.

use super::{
    is_external_or_sentinel, Checksum, CreationInfo, ExternalRef,
    ExternalRefType, PrimaryPurpose, Relationship, Supplier, DOCUMENT_ID,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// A BOM document - the root container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Format/version string, e.g. `SPDX-2.3`
    #[serde(default)]
    pub spdx_version: String,
    #[serde(default)]
    pub data_license: String,
    #[serde(rename = "SPDXID", default)]
    pub spdx_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document_namespace: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_document_refs: Vec<ExternalDocumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_info: Option<CreationInfo>,
    /// Document-level free-text comment
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// Legacy describes list; folded into relationships on load
    #[serde(default, skip_serializing)]
    pub document_describes: Vec<String>,
    #[serde(rename = "packages", default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    #[serde(
        rename = "hasExtractedLicensingInfos",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub other_licenses: Vec<OtherLicense>,
    /// Keys not modelled above (annotations, snippets, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Get the creation metadata, creating an empty block if absent.
    pub fn creation_info_mut(&mut self) -> &mut CreationInfo {
        self.creation_info.get_or_insert_with(CreationInfo::default)
    }

    /// Get a component by identifier
    #[must_use]
    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.spdx_id == id)
    }

    /// Get total component count
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// All relationships of kind DESCRIBES.
    pub fn describes_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|r| r.is_describes())
    }

    /// Identifiers targeted by this document's DESCRIBES relationships.
    #[must_use]
    pub fn described_ids(&self) -> HashSet<&str> {
        self.describes_relationships()
            .map(|r| r.ref_b.as_str())
            .collect()
    }

    /// Fold the legacy `documentDescribes` list into DESCRIBES relationships.
    ///
    /// Entries already covered by a relationship are not duplicated.
    pub fn fold_document_describes(&mut self) {
        let doc_id = if self.spdx_id.is_empty() {
            DOCUMENT_ID.to_string()
        } else {
            self.spdx_id.clone()
        };
        for target in std::mem::take(&mut self.document_describes) {
            let exists = self
                .relationships
                .iter()
                .any(|r| r.is_describes() && r.ref_a == doc_id && r.ref_b == target);
            if !exists {
                self.relationships
                    .push(Relationship::describes(doc_id.clone(), target));
            }
        }
    }

    /// Relationships with at least one endpoint that does not resolve.
    #[must_use]
    pub fn dangling_relationships(&self) -> Vec<&Relationship> {
        let known: HashSet<&str> = self
            .components
            .iter()
            .map(|c| c.spdx_id.as_str())
            .chain(self.files.iter().map(|f| f.spdx_id.as_str()))
            .chain([self.spdx_id.as_str(), DOCUMENT_ID])
            .collect();
        let resolves = |id: &str| known.contains(id) || is_external_or_sentinel(id);

        self.relationships
            .iter()
            .filter(|r| !resolves(&r.ref_a) || !resolves(&r.ref_b))
            .collect()
    }
}

/// One inventoried package/module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Identifier, unique within the owning document
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub name: String,
    #[serde(rename = "versionInfo", default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub download_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_analyzed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checksums: Vec<Checksum>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license_concluded: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license_declared: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub copyright_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_refs: Vec<ExternalRef>,
    #[serde(
        rename = "primaryPackagePurpose",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_purpose: Option<PrimaryPurpose>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A component could not be detached from its source document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot copy component '{name}' ({id}): {reason}")]
pub struct CloneError {
    pub id: String,
    pub name: String,
    pub reason: String,
}

impl Component {
    /// Create a component with just an identifier and name
    #[must_use]
    pub fn new(spdx_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style version setter
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Make an independent deep copy suitable for placing into another
    /// document.
    ///
    /// The copy goes through the JSON representation, so it carries exactly
    /// what a written document would. Identifiers are not checked.
    pub fn detach(&self) -> Result<Self, CloneError> {
        serde_json::to_value(self)
            .and_then(serde_json::from_value)
            .map_err(|e| CloneError {
                id: self.spdx_id.clone(),
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }

    /// References of exactly the given kind.
    pub fn external_refs_of<'a>(
        &'a self,
        kind: &'a ExternalRefType,
    ) -> impl Iterator<Item = &'a ExternalRef> + 'a {
        self.external_refs
            .iter()
            .filter(move |r| &r.reference_type == kind)
    }

    /// First package URL, if any
    #[must_use]
    pub fn purl(&self) -> Option<&str> {
        self.external_refs_of(&ExternalRefType::Purl)
            .next()
            .map(|r| r.reference_locator.as_str())
    }
}

/// File record; carried through merges verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Extracted ("other") license record; carried through merges verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherLicense {
    pub license_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to an external SPDX document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDocumentRef {
    pub external_document_id: String,
    pub spdx_document: String,
    pub checksum: Checksum,
}
