//! Locates the element an edit run targets.

use crate::config::{SearchSpec, Subject};
use crate::model::{Document, DOCUMENT_ID};
use thiserror::Error;

/// The element an edit run applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// The document itself
    Document,
    /// A component, by index into `Document::components`
    Component(usize),
}

/// Why a component subject could not be resolved.
///
/// Not fatal: callers run with component-scoped edits unavailable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no matching component found")]
    NotFound,

    #[error("{0} described components; primary component is ambiguous")]
    Ambiguous(usize),
}

/// Resolve the search specification against a document.
pub fn resolve(doc: &Document, search: &SearchSpec) -> Result<Resolved, ResolveError> {
    match search.subject {
        Subject::Document => Ok(Resolved::Document),
        Subject::PrimaryComponent => find_primary(doc),
        Subject::ComponentNameVersion => find_by_name_version(
            doc,
            search.name.as_deref().unwrap_or_default(),
            search.version.as_deref(),
        ),
    }
}

fn find_primary(doc: &Document) -> Result<Resolved, ResolveError> {
    let doc_id = if doc.spdx_id.is_empty() {
        DOCUMENT_ID
    } else {
        doc.spdx_id.as_str()
    };

    let mut candidates: Vec<usize> = doc
        .describes_relationships()
        .filter(|r| r.ref_a == doc_id)
        .filter_map(|r| doc.components.iter().position(|c| c.spdx_id == r.ref_b))
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    match candidates.as_slice() {
        [] => Err(ResolveError::NotFound),
        [index] => Ok(Resolved::Component(*index)),
        many => Err(ResolveError::Ambiguous(many.len())),
    }
}

fn find_by_name_version(
    doc: &Document,
    name: &str,
    version: Option<&str>,
) -> Result<Resolved, ResolveError> {
    doc.components
        .iter()
        .position(|c| {
            c.name == name && version.map_or(true, |v| v.is_empty() || c.version == v)
        })
        .map(Resolved::Component)
        .ok_or(ResolveError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Relationship, RelationshipType};

    fn doc() -> Document {
        Document {
            spdx_id: DOCUMENT_ID.to_string(),
            components: vec![
                Component::new("SPDXRef-lib", "openssl").with_version("1.1"),
                Component::new("SPDXRef-lib3", "openssl").with_version("3.0"),
                Component::new("SPDXRef-app", "app"),
            ],
            relationships: vec![
                Relationship::describes(DOCUMENT_ID, "SPDXRef-app"),
                Relationship::new("SPDXRef-app", RelationshipType::DependsOn, "SPDXRef-lib"),
            ],
            ..Default::default()
        }
    }

    fn search(subject: Subject, name: Option<&str>, version: Option<&str>) -> SearchSpec {
        SearchSpec {
            subject,
            name: name.map(String::from),
            version: version.map(String::from),
        }
    }

    #[test]
    fn test_document_subject() {
        assert_eq!(
            resolve(&doc(), &search(Subject::Document, None, None)),
            Ok(Resolved::Document)
        );
    }

    #[test]
    fn test_primary_component() {
        assert_eq!(
            resolve(&doc(), &search(Subject::PrimaryComponent, None, None)),
            Ok(Resolved::Component(2))
        );
    }

    #[test]
    fn test_primary_component_missing() {
        let mut d = doc();
        d.relationships.retain(|r| !r.is_describes());
        assert_eq!(
            resolve(&d, &search(Subject::PrimaryComponent, None, None)),
            Err(ResolveError::NotFound)
        );
    }

    #[test]
    fn test_primary_component_ambiguous() {
        let mut d = doc();
        d.relationships
            .push(Relationship::describes(DOCUMENT_ID, "SPDXRef-lib"));
        assert_eq!(
            resolve(&d, &search(Subject::PrimaryComponent, None, None)),
            Err(ResolveError::Ambiguous(2))
        );
    }

    #[test]
    fn test_duplicate_describes_same_target_is_not_ambiguous() {
        let mut d = doc();
        d.relationships
            .push(Relationship::describes(DOCUMENT_ID, "SPDXRef-app"));
        assert_eq!(
            resolve(&d, &search(Subject::PrimaryComponent, None, None)),
            Ok(Resolved::Component(2))
        );
    }

    #[test]
    fn test_name_version_first_match() {
        let d = doc();
        assert_eq!(
            resolve(&d, &search(Subject::ComponentNameVersion, Some("openssl"), None)),
            Ok(Resolved::Component(0))
        );
        assert_eq!(
            resolve(
                &d,
                &search(Subject::ComponentNameVersion, Some("openssl"), Some("3.0"))
            ),
            Ok(Resolved::Component(1))
        );
        assert_eq!(
            resolve(
                &d,
                &search(Subject::ComponentNameVersion, Some("openssl"), Some("9.9"))
            ),
            Err(ResolveError::NotFound)
        );
        assert_eq!(
            resolve(&d, &search(Subject::ComponentNameVersion, Some("OpenSSL"), None)),
            Err(ResolveError::NotFound)
        );
    }
}
