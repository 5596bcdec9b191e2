//! Metadata structures for SBOM documents and components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error for metadata strings that do not follow the `Type: value` layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {what} '{value}': expected one of {expected}")]
pub struct MetadataParseError {
    pub what: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Document creation metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationInfo {
    /// Creation timestamp
    #[serde(
        default,
        with = "spdx_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    /// Creators/authors/tools
    #[serde(default)]
    pub creators: Vec<Creator>,
    /// Free-text creator comment
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// SPDX license list version the document was written against
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license_list_version: String,
}

/// Creator information
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Creator {
    /// Creator type
    pub creator_type: CreatorType,
    /// Display string, e.g. `Jane Doe (jane@example.com)` or `syft-1.0`
    pub name: String,
}

impl Creator {
    #[must_use]
    pub fn new(creator_type: CreatorType, name: impl Into<String>) -> Self {
        Self {
            creator_type,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn tool(name: impl Into<String>) -> Self {
        Self::new(CreatorType::Tool, name)
    }

    #[must_use]
    pub fn person(name: impl Into<String>) -> Self {
        Self::new(CreatorType::Person, name)
    }

    #[must_use]
    pub fn organization(name: impl Into<String>) -> Self {
        Self::new(CreatorType::Organization, name)
    }
}

impl TryFrom<String> for Creator {
    type Error = MetadataParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let err = || MetadataParseError {
            what: "creator",
            value: s.clone(),
            expected: "'Tool: x', 'Person: x', 'Organization: x'",
        };
        let (kind, name) = s.split_once(':').ok_or_else(err)?;
        let creator_type = match kind.trim() {
            "Tool" => CreatorType::Tool,
            "Person" => CreatorType::Person,
            "Organization" => CreatorType::Organization,
            _ => return Err(err()),
        };
        Ok(Self::new(creator_type, name.trim()))
    }
}

impl From<Creator> for String {
    fn from(c: Creator) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.creator_type, self.name)
    }
}

/// Type of creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatorType {
    Person,
    Organization,
    Tool,
}

impl fmt::Display for CreatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person => write!(f, "Person"),
            Self::Organization => write!(f, "Organization"),
            Self::Tool => write!(f, "Tool"),
        }
    }
}

/// Component supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Supplier {
    pub supplier_type: SupplierType,
    /// Display string; empty for [`SupplierType::NoAssertion`]
    pub name: String,
}

/// Supplier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierType {
    Organization,
    Person,
    NoAssertion,
}

impl Supplier {
    #[must_use]
    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            supplier_type: SupplierType::Organization,
            name: name.into(),
        }
    }

    #[must_use]
    pub const fn no_assertion() -> Self {
        Self {
            supplier_type: SupplierType::NoAssertion,
            name: String::new(),
        }
    }
}

impl TryFrom<String> for Supplier {
    type Error = MetadataParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim() == super::NOASSERTION {
            return Ok(Self::no_assertion());
        }
        let err = || MetadataParseError {
            what: "supplier",
            value: s.clone(),
            expected: "'Organization: x', 'Person: x', 'NOASSERTION'",
        };
        let (kind, name) = s.split_once(':').ok_or_else(err)?;
        let supplier_type = match kind.trim() {
            "Organization" => SupplierType::Organization,
            "Person" => SupplierType::Person,
            _ => return Err(err()),
        };
        Ok(Self {
            supplier_type,
            name: name.trim().to_string(),
        })
    }
}

impl From<Supplier> for String {
    fn from(s: Supplier) -> Self {
        s.to_string()
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.supplier_type {
            SupplierType::Organization => write!(f, "Organization: {}", self.name),
            SupplierType::Person => write!(f, "Person: {}", self.name),
            SupplierType::NoAssertion => write!(f, "{}", super::NOASSERTION),
        }
    }
}

/// Cryptographic checksum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    /// Hex-encoded digest
    pub checksum_value: String,
}

impl Checksum {
    #[must_use]
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            checksum_value: value.into(),
        }
    }
}

/// Checksum algorithms known to SPDX 2.3
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Md2,
    Md4,
    Md5,
    Md6,
    Adler32,
    Other(String),
}

impl ChecksumAlgorithm {
    /// Look up an algorithm name, ignoring case and `-`/`_` separators.
    ///
    /// Returns `None` for names outside the SPDX vocabulary.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_uppercase();
        let algo = match key.as_str() {
            "SHA1" => Self::Sha1,
            "SHA224" => Self::Sha224,
            "SHA256" => Self::Sha256,
            "SHA384" => Self::Sha384,
            "SHA512" => Self::Sha512,
            "SHA3256" => Self::Sha3_256,
            "SHA3384" => Self::Sha3_384,
            "SHA3512" => Self::Sha3_512,
            "BLAKE2B256" => Self::Blake2b256,
            "BLAKE2B384" => Self::Blake2b384,
            "BLAKE2B512" => Self::Blake2b512,
            "BLAKE3" => Self::Blake3,
            "MD2" => Self::Md2,
            "MD4" => Self::Md4,
            "MD5" => Self::Md5,
            "MD6" => Self::Md6,
            "ADLER32" => Self::Adler32,
            _ => return None,
        };
        Some(algo)
    }
}

impl From<String> for ChecksumAlgorithm {
    fn from(s: String) -> Self {
        Self::lookup(&s).unwrap_or(Self::Other(s))
    }
}

impl From<ChecksumAlgorithm> for String {
    fn from(a: ChecksumAlgorithm) -> Self {
        a.to_string()
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
            Self::Md2 => "MD2",
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Md6 => "MD6",
            Self::Adler32 => "ADLER32",
            Self::Other(s) => s,
        };
        write!(f, "{s}")
    }
}

/// Closed vocabulary for a package's primary purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum PrimaryPurpose {
    Application,
    Framework,
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    Source,
    Archive,
    File,
    Install,
    Other,
}

impl PrimaryPurpose {
    /// Case-insensitive lookup of a user-supplied purpose name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let purpose = match name.trim().to_lowercase().as_str() {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library" => Self::Library,
            "container" => Self::Container,
            "operating-system" | "operating_system" | "os" => Self::OperatingSystem,
            "device" => Self::Device,
            "firmware" => Self::Firmware,
            "source" => Self::Source,
            "archive" => Self::Archive,
            "file" => Self::File,
            "install" => Self::Install,
            "other" => Self::Other,
            _ => return None,
        };
        Some(purpose)
    }
}

impl fmt::Display for PrimaryPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Application => "APPLICATION",
            Self::Framework => "FRAMEWORK",
            Self::Library => "LIBRARY",
            Self::Container => "CONTAINER",
            Self::OperatingSystem => "OPERATING-SYSTEM",
            Self::Device => "DEVICE",
            Self::Firmware => "FIRMWARE",
            Self::Source => "SOURCE",
            Self::Archive => "ARCHIVE",
            Self::File => "FILE",
            Self::Install => "INSTALL",
            Self::Other => "OTHER",
        };
        write!(f, "{s}")
    }
}

/// Current UTC time truncated to whole seconds, the precision SPDX records.
#[must_use]
pub fn utc_now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

/// Serde adapter for SPDX `YYYY-MM-DDThh:mm:ssZ` timestamps.
pub mod spdx_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}
