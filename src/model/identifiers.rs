//! Element identifiers and typed external references.
//!
//! SPDX identifies every element (document, package, file) with an
//! `SPDXRef-<idstring>` string. Relationships point at these strings, and
//! may also point into external documents (`DocumentRef-x:SPDXRef-y`) or
//! use the `NOASSERTION` / `NONE` sentinels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the document element itself.
pub const DOCUMENT_ID: &str = "SPDXRef-DOCUMENT";

/// Sentinel meaning "no claim is made".
pub const NOASSERTION: &str = "NOASSERTION";

/// Sentinel meaning "there is no such element".
pub const NONE: &str = "NONE";

/// Returns true if `id` points into another document or is a sentinel,
/// i.e. it does not need to resolve inside the current document.
#[must_use]
pub fn is_external_or_sentinel(id: &str) -> bool {
    id == NOASSERTION || id == NONE || id.starts_with("DocumentRef-")
}

/// Generate a fresh, globally unique element identifier with the given label.
///
/// `ElementIdGenerator::fresh("Package")` yields `SPDXRef-Package-<uuid>`.
pub struct ElementIdGenerator;

impl ElementIdGenerator {
    #[must_use]
    pub fn fresh(label: &str) -> String {
        format!("SPDXRef-{label}-{}", uuid::Uuid::new_v4())
    }
}

/// Well-known external reference kinds.
///
/// Kinds are matched case-insensitively on load, so `PURL` and `purl` are
/// the same kind. Anything unrecognised is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExternalRefType {
    /// Package URL (package-manager locator)
    Purl,
    /// CPE 2.3 formatted string (security identifier)
    Cpe23,
    /// CPE 2.2 URI (security identifier)
    Cpe22,
    /// SWID tag
    Swid,
    Other(String),
}

impl ExternalRefType {
    /// The reference category SPDX expects for this kind.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Purl => "PACKAGE-MANAGER",
            Self::Cpe23 | Self::Cpe22 | Self::Swid => "SECURITY",
            Self::Other(_) => "OTHER",
        }
    }
}

impl From<String> for ExternalRefType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "purl" => Self::Purl,
            "cpe23type" => Self::Cpe23,
            "cpe22type" => Self::Cpe22,
            "swid" => Self::Swid,
            _ => Self::Other(s),
        }
    }
}

impl From<ExternalRefType> for String {
    fn from(t: ExternalRefType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ExternalRefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Purl => write!(f, "purl"),
            Self::Cpe23 => write!(f, "cpe23Type"),
            Self::Cpe22 => write!(f, "cpe22Type"),
            Self::Swid => write!(f, "swid"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A typed locator attached to a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRef {
    pub reference_category: String,
    pub reference_type: ExternalRefType,
    pub reference_locator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ExternalRef {
    /// Create a reference of the given kind, deriving its category.
    #[must_use]
    pub fn new(reference_type: ExternalRefType, locator: impl Into<String>) -> Self {
        Self {
            reference_category: reference_type.category().to_string(),
            reference_type,
            reference_locator: locator.into(),
            comment: None,
        }
    }

    /// Package URL reference.
    #[must_use]
    pub fn purl(locator: impl Into<String>) -> Self {
        Self::new(ExternalRefType::Purl, locator)
    }

    /// CPE 2.3 reference.
    #[must_use]
    pub fn cpe(locator: impl Into<String>) -> Self {
        Self::new(ExternalRefType::Cpe23, locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = ElementIdGenerator::fresh("Package");
        let b = ElementIdGenerator::fresh("Package");
        assert_ne!(a, b);
        assert!(a.starts_with("SPDXRef-Package-"));
        let suffix = &a["SPDXRef-Package-".len()..];
        assert!(uuid::Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn test_external_ref_type_case_insensitive() {
        assert_eq!(ExternalRefType::from("PURL".to_string()), ExternalRefType::Purl);
        assert_eq!(
            ExternalRefType::from("CPE23TYPE".to_string()),
            ExternalRefType::Cpe23
        );
        assert_eq!(
            ExternalRefType::from("gitoid".to_string()),
            ExternalRefType::Other("gitoid".to_string())
        );
        assert_eq!(ExternalRefType::Cpe23.to_string(), "cpe23Type");
    }

    #[test]
    fn test_external_ref_categories() {
        assert_eq!(ExternalRef::purl("pkg:npm/a@1").reference_category, "PACKAGE-MANAGER");
        assert_eq!(ExternalRef::cpe("cpe:2.3:a:x:y:1").reference_category, "SECURITY");
    }

    #[test]
    fn test_sentinels_are_external() {
        assert!(is_external_or_sentinel("NOASSERTION"));
        assert!(is_external_or_sentinel("DocumentRef-other:SPDXRef-x"));
        assert!(!is_external_or_sentinel("SPDXRef-x"));
    }
}
