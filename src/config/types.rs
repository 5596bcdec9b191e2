//! Configuration types for edit and merge operations.
//!
//! The core engines treat these as pre-validated input; see
//! [`Validatable`](super::Validatable) for the checks the CLI runs first.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Shared value types
// ============================================================================

/// Identity of the running tool, stamped into every document it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIdentity {
    pub name: String,
    pub version: String,
}

impl ToolIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Creator display string, `name-version`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// A `name (value)` pair used for suppliers, authors and tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NameValue {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl NameValue {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// `name (value)`, or just `name` when there is no value.
    #[must_use]
    pub fn display(&self) -> String {
        if self.value.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.value)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }
}

impl FromStr for NameValue {
    type Err = String;

    /// Parses `Name (value)` or a bare `Name`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty value".to_string());
        }
        match s.rfind('(') {
            Some(open) if s.ends_with(')') => Ok(Self::new(
                s[..open].trim(),
                s[open + 1..s.len() - 1].trim(),
            )),
            _ => Ok(Self::new(s, "")),
        }
    }
}

/// A license given either as an SPDX id or as a full expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LicenseSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub expression: String,
}

impl LicenseSpec {
    /// The expression if given, otherwise the id.
    #[must_use]
    pub fn effective(&self) -> &str {
        if self.expression.is_empty() {
            &self.id
        } else {
            &self.expression
        }
    }
}

impl FromStr for LicenseSpec {
    type Err = String;

    /// A single token is an id; anything with whitespace is an expression.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty license".to_string());
        }
        if s.contains(char::is_whitespace) {
            Ok(Self {
                id: String::new(),
                expression: s.to_string(),
            })
        } else {
            Ok(Self {
                id: s.to_string(),
                expression: String::new(),
            })
        }
    }
}

/// A checksum as configured by the user: algorithm name + hex value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HashSpec {
    pub algorithm: String,
    #[serde(default)]
    pub value: String,
}

impl FromStr for HashSpec {
    type Err = String;

    /// Parses `ALGORITHM (value)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nv: NameValue = s.parse()?;
        Ok(Self {
            algorithm: nv.name,
            value: nv.value,
        })
    }
}

// ============================================================================
// Edit configuration
// ============================================================================

/// Which element of the document an edit targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    /// The document itself
    #[default]
    Document,
    /// The component named by the document's DESCRIBES relationship
    PrimaryComponent,
    /// The first component matching a name (and optional version)
    ComponentNameVersion,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document"),
            Self::PrimaryComponent => write!(f, "primary-component"),
            Self::ComponentNameVersion => write!(f, "component-name-version"),
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "document" => Ok(Self::Document),
            "primary-component" => Ok(Self::PrimaryComponent),
            "component-name-version" => Ok(Self::ComponentNameVersion),
            other => Err(format!(
                "unknown subject '{other}' (expected document, primary-component, component-name-version)"
            )),
        }
    }
}

/// Search specification used by the subject resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchSpec {
    pub subject: Subject,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Values to apply, one slot per editable field. `None` / empty means the
/// field was not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FieldValues {
    pub name: Option<String>,
    pub version: Option<String>,
    pub supplier: Option<NameValue>,
    pub authors: Vec<NameValue>,
    pub purl: Option<String>,
    pub cpe: Option<String>,
    pub licenses: Vec<LicenseSpec>,
    pub hashes: Vec<HashSpec>,
    pub tools: Vec<NameValue>,
    pub copyright: Option<String>,
    pub lifecycles: Vec<String>,
    pub description: Option<String>,
    pub repository: Option<String>,
    pub primary_purpose: Option<String>,
}

/// Complete request for one edit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EditConfig {
    pub search: SearchSpec,
    pub policy: crate::edit::Policy,
    pub fields: FieldValues,
}

// ============================================================================
// Merge configuration
// ============================================================================

/// Application-level metadata used to synthesize the merged root component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub authors: Vec<NameValue>,
    pub primary_purpose: String,
    pub supplier: NameValue,
    pub license: LicenseSpec,
    pub purl: String,
    pub cpe: String,
    pub copyright: String,
    pub checksums: Vec<HashSpec>,
}

/// Input documents, merged in the listed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InputConfig {
    pub files: Vec<PathBuf>,
}

/// Serialization format for written documents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Where and how the output document is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path (stdout if not specified)
    pub file: Option<PathBuf>,
    /// Output format (json if not specified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl OutputConfig {
    /// The format to write, falling back to JSON.
    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Merge strategy selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AssembleConfig {
    /// Collapse inputs without a synthesized root (not implemented)
    pub flat_merge: bool,
}

/// Top-level merge configuration, loadable from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MergeConfig {
    pub app: AppMetadata,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub assemble: AssembleConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_value_parsing() {
        let nv: NameValue = "Acme Corp (https://acme.io)".parse().unwrap();
        assert_eq!(nv.name, "Acme Corp");
        assert_eq!(nv.value, "https://acme.io");
        assert_eq!(nv.display(), "Acme Corp (https://acme.io)");

        let bare: NameValue = "Jane".parse().unwrap();
        assert_eq!(bare.value, "");
        assert_eq!(bare.display(), "Jane");

        assert!("  ".parse::<NameValue>().is_err());
    }

    #[test]
    fn test_license_spec_parsing() {
        let id: LicenseSpec = "MIT".parse().unwrap();
        assert_eq!(id.id, "MIT");
        assert_eq!(id.effective(), "MIT");

        let expr: LicenseSpec = "MIT OR Apache-2.0".parse().unwrap();
        assert!(expr.id.is_empty());
        assert_eq!(expr.effective(), "MIT OR Apache-2.0");
    }

    #[test]
    fn test_hash_spec_parsing() {
        let h: HashSpec = "SHA256 (abcd)".parse().unwrap();
        assert_eq!(h.algorithm, "SHA256");
        assert_eq!(h.value, "abcd");
    }

    #[test]
    fn test_subject_parsing() {
        assert_eq!(
            "primary-component".parse::<Subject>().unwrap(),
            Subject::PrimaryComponent
        );
        assert!("package".parse::<Subject>().is_err());
        assert_eq!(Subject::ComponentNameVersion.to_string(), "component-name-version");
    }

    #[test]
    fn test_tool_identity_display() {
        assert_eq!(ToolIdentity::new("sbom-assembler", "0.1.0").display_name(), "sbom-assembler-0.1.0");
    }

    #[test]
    fn test_merge_config_from_yaml() {
        let yaml = r#"
app:
  name: fleet
  version: "2.0"
  authors:
    - name: Jane
      value: jane@example.com
  license:
    id: Apache-2.0
  checksums:
    - algorithm: SHA256
      value: "00ff"
input:
  files: [a.spdx.json, b.spdx.json]
output:
  file: out.spdx.json
"#;
        let config: MergeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.app.name, "fleet");
        assert_eq!(config.app.authors.len(), 1);
        assert_eq!(config.input.files.len(), 2);
        assert_eq!(config.output.format, None);
        assert_eq!(config.output.format(), OutputFormat::Json);
        assert!(!config.assemble.flat_merge);
    }
}
