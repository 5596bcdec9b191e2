//! Directed relationships between document elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge between two element identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Source element (`spdxElementId`)
    #[serde(rename = "spdxElementId")]
    pub ref_a: String,
    pub relationship_type: RelationshipType,
    /// Target element (`relatedSpdxElement`)
    #[serde(rename = "relatedSpdxElement")]
    pub ref_b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Relationship {
    #[must_use]
    pub fn new(
        ref_a: impl Into<String>,
        relationship_type: RelationshipType,
        ref_b: impl Into<String>,
    ) -> Self {
        Self {
            ref_a: ref_a.into(),
            relationship_type,
            ref_b: ref_b.into(),
            comment: None,
        }
    }

    #[must_use]
    pub fn describes(document: impl Into<String>, element: impl Into<String>) -> Self {
        Self::new(document, RelationshipType::Describes, element)
    }

    #[must_use]
    pub fn contains(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(parent, RelationshipType::Contains, child)
    }

    #[must_use]
    pub fn is_describes(&self) -> bool {
        self.relationship_type == RelationshipType::Describes
    }

    /// Replace every endpoint equal to `from` with `to`.
    ///
    /// Both ends are checked independently. Returns the number of endpoints
    /// rewritten.
    pub fn rewrite_endpoint(&mut self, from: &str, to: &str) -> usize {
        let mut rewritten = 0;
        if self.ref_a == from {
            self.ref_a = to.to_string();
            rewritten += 1;
        }
        if self.ref_b == from {
            self.ref_b = to.to_string();
            rewritten += 1;
        }
        rewritten
    }
}

/// Relationship kinds. Only the kinds the engines act on are named;
/// everything else is carried in [`RelationshipType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Describes,
    DescribedBy,
    Contains,
    ContainedBy,
    DependsOn,
    DependencyOf,
    Other(String),
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        match s.to_uppercase().as_str() {
            "DESCRIBES" => Self::Describes,
            "DESCRIBED_BY" => Self::DescribedBy,
            "CONTAINS" => Self::Contains,
            "CONTAINED_BY" => Self::ContainedBy,
            "DEPENDS_ON" => Self::DependsOn,
            "DEPENDENCY_OF" => Self::DependencyOf,
            _ => Self::Other(s),
        }
    }
}

impl From<RelationshipType> for String {
    fn from(t: RelationshipType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Describes => write!(f, "DESCRIBES"),
            Self::DescribedBy => write!(f, "DESCRIBED_BY"),
            Self::Contains => write!(f, "CONTAINS"),
            Self::ContainedBy => write!(f, "CONTAINED_BY"),
            Self::DependsOn => write!(f, "DEPENDS_ON"),
            Self::DependencyOf => write!(f, "DEPENDENCY_OF"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_json_shape() {
        let rel = Relationship::describes("SPDXRef-DOCUMENT", "SPDXRef-app");
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(json["spdxElementId"], "SPDXRef-DOCUMENT");
        assert_eq!(json["relationshipType"], "DESCRIBES");
        assert_eq!(json["relatedSpdxElement"], "SPDXRef-app");
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn test_rewrite_checks_both_ends() {
        let mut rel = Relationship::new("SPDXRef-a", RelationshipType::DependsOn, "SPDXRef-a");
        assert_eq!(rel.rewrite_endpoint("SPDXRef-a", "SPDXRef-b"), 2);
        assert_eq!(rel.ref_a, "SPDXRef-b");
        assert_eq!(rel.ref_b, "SPDXRef-b");
        assert_eq!(rel.rewrite_endpoint("SPDXRef-a", "SPDXRef-c"), 0);
    }

    #[test]
    fn test_unknown_kind_preserved() {
        let kind = RelationshipType::from("GENERATED_FROM".to_string());
        assert_eq!(kind, RelationshipType::Other("GENERATED_FROM".to_string()));
        assert_eq!(kind.to_string(), "GENERATED_FROM");
    }
}
