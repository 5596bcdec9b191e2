//! Encoding detection for document inputs.
//!
//! Documents arrive as SPDX JSON or SPDX YAML. The file extension decides
//! when it is conclusive, otherwise the content is sniffed.

use std::path::Path;

/// Supported SPDX document versions
pub const SUPPORTED_VERSIONS: &[&str] = &["SPDX-2.2", "SPDX-2.3"];

/// Serialized encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Yaml,
}

impl Encoding {
    /// Human-readable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Detect from a path's extension (`.json`, `.yaml`, `.yml`).
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Sniff the encoding from content.
    ///
    /// A leading `{` means JSON; a YAML mapping with an `spdxVersion` key
    /// means YAML. Anything else (tag-value, XML, CycloneDX) is unknown.
    #[must_use]
    pub fn from_content(content: &str) -> Option<Self> {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();
        match trimmed.chars().next()? {
            '{' => Some(Self::Json),
            '<' => None,
            _ => trimmed
                .lines()
                .any(|line| {
                    let line = line.trim_start_matches("---").trim();
                    line.starts_with("spdxVersion:") || line.starts_with("\"spdxVersion\":")
                })
                .then_some(Self::Yaml),
        }
    }

    /// Extension first, then content.
    #[must_use]
    pub fn detect(path: Option<&Path>, content: &str) -> Option<Self> {
        path.and_then(Self::from_extension)
            .or_else(|| Self::from_content(content))
    }
}

/// Returns true if the version string is one this crate reads.
#[must_use]
pub fn is_supported_version(version: &str) -> bool {
    SUPPORTED_VERSIONS.contains(&version.trim())
}
