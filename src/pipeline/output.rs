//! Output handling for written documents.
//!
//! A document is serialized into one buffer and written with a single call,
//! so a serialization failure never leaves a partial file behind.

use crate::config::OutputFormat;
use crate::error::{AssemblerError, Result, WriteErrorKind};
use crate::model::Document;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file (created or truncated)
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Serialize a document in the given format.
pub fn serialize_document(doc: &Document, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => serde_json::to_vec_pretty(doc).map_err(|e| {
            AssemblerError::write("serializing document", WriteErrorKind::JsonSerialization(e.to_string()))
        }),
        OutputFormat::Yaml => serde_yaml::to_string(doc)
            .map(String::into_bytes)
            .map_err(|e| {
                AssemblerError::write(
                    "serializing document",
                    WriteErrorKind::YamlSerialization(e.to_string()),
                )
            }),
    }
}

/// Serialize and write a document; returns the number of bytes written.
///
/// The file target is only created once serialization has succeeded.
// TODO: write to a sibling temp file and rename it into place so a failed
// write cannot leave a truncated document at the destination.
pub fn write_document(doc: &Document, target: &OutputTarget, format: OutputFormat) -> Result<usize> {
    let buf = serialize_document(doc, format)?;

    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&buf)?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            let mut file = std::fs::File::create(path).map_err(|e| AssemblerError::io(path, e))?;
            file.write_all(&buf).map_err(|e| AssemblerError::io(path, e))?;
            tracing::info!("SBOM written to {}", path.display());
        }
    }
    Ok(buf.len())
}
