//! Document loading.
//!
//! Reads SPDX 2.x documents in JSON or YAML into the in-memory model. The
//! loader detects the encoding, checks the document version, folds the
//! legacy `documentDescribes` list into relationships and rejects documents
//! whose components reuse an identifier.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_assembler::parsers::load_document;
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("app.spdx.json"))?;
//! println!("{} components", doc.component_count());
//! # Ok::<(), sbom_assembler::AssemblerError>(())
//! ```

mod detection;

pub use detection::{is_supported_version, Encoding, SUPPORTED_VERSIONS};

use crate::error::{AssemblerError, ErrorContext, LoadErrorKind, Result};
use crate::model::Document;
use std::collections::HashSet;
use std::path::Path;

/// Maximum document file size (512 MB).
const MAX_DOCUMENT_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Load a document from disk.
pub fn load_document(path: &Path) -> Result<Document> {
    let metadata = std::fs::metadata(path).map_err(|e| AssemblerError::io(path, e))?;
    check_size(path, metadata.len(), MAX_DOCUMENT_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).map_err(|e| AssemblerError::io(path, e))?;
    let encoding = Encoding::detect(Some(path), &content)
        .ok_or_else(|| AssemblerError::unknown_format(path.display().to_string()))?;
    parse_document(&content, encoding).with_context(|| path.display().to_string())
}

fn check_size(path: &Path, len: u64, limit: u64) -> Result<()> {
    if len > limit {
        return Err(AssemblerError::load(
            path.display().to_string(),
            LoadErrorKind::FileTooLarge {
                size_mb: len / (1024 * 1024),
                limit_mb: limit / (1024 * 1024),
            },
        ));
    }
    Ok(())
}

/// Parse a document from a string, sniffing the encoding.
pub fn parse_document_str(content: &str) -> Result<Document> {
    let encoding =
        Encoding::from_content(content).ok_or_else(|| AssemblerError::unknown_format("<string>"))?;
    parse_document(content, encoding)
}

/// Parse a document with a known encoding.
pub fn parse_document(content: &str, encoding: Encoding) -> Result<Document> {
    let mut doc: Document = match encoding {
        Encoding::Json => serde_json::from_str(content)?,
        Encoding::Yaml => serde_yaml::from_str(content)?,
    };

    if !is_supported_version(&doc.spdx_version) {
        return Err(AssemblerError::load(
            "",
            LoadErrorKind::UnsupportedVersion {
                version: doc.spdx_version.clone(),
                supported: SUPPORTED_VERSIONS.join(", "),
            },
        ));
    }

    let mut seen = HashSet::with_capacity(doc.components.len());
    if let Some(dup) = doc
        .components
        .iter()
        .find(|c| !seen.insert(c.spdx_id.as_str()))
    {
        return Err(AssemblerError::load(
            "",
            LoadErrorKind::DuplicateId(dup.spdx_id.clone()),
        ));
    }

    doc.fold_document_describes();

    tracing::debug!(
        "Parsed {} document '{}': {} components, {} relationships",
        encoding.name(),
        doc.name,
        doc.components.len(),
        doc.relationships.len()
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "spdxVersion": "SPDX-2.3",
        "dataLicense": "CC0-1.0",
        "SPDXID": "SPDXRef-DOCUMENT",
        "name": "app",
        "documentNamespace": "https://example.com/app",
        "documentDescribes": ["SPDXRef-app"],
        "packages": [{"SPDXID": "SPDXRef-app", "name": "app"}]
    }"#;

    #[test]
    fn test_parse_folds_document_describes() {
        let doc = parse_document_str(MINIMAL).unwrap();
        assert_eq!(doc.describes_relationships().count(), 1);
        assert!(doc.document_describes.is_empty());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "spdxVersion: SPDX-2.3\nSPDXID: SPDXRef-DOCUMENT\nname: app\npackages:\n  - SPDXID: SPDXRef-a\n    name: a\n";
        let doc = parse_document_str(yaml).unwrap();
        assert_eq!(doc.component_count(), 1);
    }

    #[test]
    fn test_oversized_file_is_reported_as_too_large() {
        let path = Path::new("huge.spdx.json");
        let err = check_size(path, 600 * 1024 * 1024, MAX_DOCUMENT_FILE_SIZE).unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::Load {
                source: LoadErrorKind::FileTooLarge {
                    size_mb: 600,
                    limit_mb: 512
                },
                ..
            }
        ));
        assert!(err.to_string().contains("huge.spdx.json"));
        assert!(check_size(path, MAX_DOCUMENT_FILE_SIZE, MAX_DOCUMENT_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_invalid_json_keeps_parser_message() {
        let err = parse_document("{\"spdxVersion\": ", Encoding::Json).unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::Load {
                source: LoadErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let err = parse_document_str(r#"{"spdxVersion": "SPDX-3.0"}"#).unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::Load {
                source: LoadErrorKind::UnsupportedVersion { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "spdxVersion": "SPDX-2.3",
            "packages": [
                {"SPDXID": "SPDXRef-a", "name": "a"},
                {"SPDXID": "SPDXRef-a", "name": "b"}
            ]
        }"#;
        let err = parse_document_str(json).unwrap_err();
        assert!(matches!(
            err,
            AssemblerError::Load {
                source: LoadErrorKind::DuplicateId(_),
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(parse_document_str("SPDXVersion: SPDX-2.3").is_err());
    }

    #[test]
    fn test_load_document_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.spdx.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(err.to_string().contains("bad.spdx.json"));
    }
}
