//! Input loading for CLI commands.

use crate::model::Document;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load one document with context for error messages
pub fn parse_document_with_context(path: &Path, quiet: bool) -> Result<Document> {
    if !quiet {
        tracing::info!("Loading SBOM: {}", path.display());
    }

    let doc = crate::parsers::load_document(path)
        .with_context(|| format!("Failed to load SBOM: {}", path.display()))?;

    if !quiet {
        tracing::info!("Loaded {} components", doc.component_count());
    }
    Ok(doc)
}

/// Load every input in order; the first failure aborts.
pub fn load_inputs(paths: &[PathBuf], quiet: bool) -> Result<Vec<Document>> {
    paths
        .iter()
        .map(|path| parse_document_with_context(path, quiet))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"spdxVersion": "SPDX-2.3", "SPDXID": "SPDXRef-DOCUMENT", "name": "a"}"#;

    #[test]
    fn test_load_inputs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, DOC).unwrap();
        std::fs::write(&b, DOC.replace("\"a\"", "\"b\"")).unwrap();

        let docs = load_inputs(&[a, b], true).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].name, "b");
    }

    #[test]
    fn test_missing_input_names_path() {
        let err = load_inputs(&[PathBuf::from("/nonexistent/x.json")], true).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/x.json"));
    }
}
