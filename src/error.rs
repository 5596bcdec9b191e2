//! Unified error types for sbom-assembler.
//!
//! Fatal failures (load, merge reconciliation, write) are represented here.
//! Per-field edit outcomes and per-component copy failures are absorbed by
//! the engines and never surface as [`AssemblerError`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-assembler operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AssemblerError {
    /// Errors while loading an input document
    #[error("Failed to load SBOM: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors during a merge
    #[error("Merge failed: {context}")]
    Merge {
        context: String,
        #[source]
        source: MergeErrorKind,
    },

    /// Errors while serializing or writing the output document
    #[error("Failed to write SBOM: {context}")]
    Write {
        context: String,
        #[source]
        source: WriteErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Unknown document format - expected SPDX JSON or YAML")]
    UnknownFormat,

    #[error("Unsupported document version: {version} (supported: {supported})")]
    UnsupportedVersion { version: String, supported: String },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Duplicate element identifier: {0}")]
    DuplicateId(String),

    #[error("File is {size_mb} MB, exceeding the {limit_mb} MB limit")]
    FileTooLarge { size_mb: u64, limit_mb: u64 },
}

/// Specific merge error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MergeErrorKind {
    #[error("License list version '{version}' is not a valid version: {reason}")]
    VersionParse { version: String, reason: String },

    #[error("Not implemented: {0}")]
    Unimplemented(String),

    #[error("No input documents provided")]
    NoInputs,
}

/// Specific write error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WriteErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(String),

    #[error("YAML serialization failed: {0}")]
    YamlSerialization(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-assembler operations
pub type Result<T> = std::result::Result<T, AssemblerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AssemblerError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for unknown format
    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::load(format!("at {}", path.into()), LoadErrorKind::UnknownFormat)
    }

    /// Create a merge error with context
    pub fn merge(context: impl Into<String>, source: MergeErrorKind) -> Self {
        Self::Merge {
            context: context.into(),
            source,
        }
    }

    /// Create an "unimplemented" merge error
    pub fn unimplemented(what: impl Into<String>) -> Self {
        let what = what.into();
        Self::merge(what.clone(), MergeErrorKind::Unimplemented(what))
    }

    /// Create a write error with context
    pub fn write(context: impl Into<String>, source: WriteErrorKind) -> Self {
        Self::Write {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Returns true if this error is the flat-merge "not implemented" failure.
    #[must_use]
    pub fn is_unimplemented(&self) -> bool {
        matches!(
            self,
            Self::Merge {
                source: MergeErrorKind::Unimplemented(_),
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AssemblerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AssemblerError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for AssemblerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::load(
            "YAML deserialization",
            LoadErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is chained in front of any existing context, so a
/// failure deep in a merge reads `"merging 3 documents: license list: ..."`.
///
/// # Example
///
/// ```ignore
/// use sbom_assembler::error::ErrorContext;
///
/// let doc = load_document(path)
///     .with_context(|| format!("input #{index}"))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AssemblerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AssemblerError, new_ctx: &str) -> AssemblerError {
    match err {
        AssemblerError::Load {
            context: existing,
            source,
        } => AssemblerError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssemblerError::Merge {
            context: existing,
            source,
        } => AssemblerError::Merge {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssemblerError::Write {
            context: existing,
            source,
        } => AssemblerError::Write {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AssemblerError::Io {
            path,
            message,
            source,
        } => AssemblerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssemblerError::unknown_format("input.txt");
        let display = err.to_string();
        assert!(
            display.contains("load") || display.contains("SBOM"),
            "Error message should mention loading: {}",
            display
        );
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AssemblerError::io("/path/to/file.json", io_err);

        assert!(err.to_string().contains("/path/to/file.json"));
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(AssemblerError::merge(
            "license list",
            MergeErrorKind::VersionParse {
                version: "abc".to_string(),
                reason: "bad".to_string(),
            },
        ));

        match initial.context("merging 2 documents") {
            Err(AssemblerError::Merge { context, .. }) => {
                assert_eq!(context, "merging 2 documents: license list");
            }
            _ => panic!("Expected Merge error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(AssemblerError::unknown_format("x.txt"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_unimplemented_detection() {
        assert!(AssemblerError::unimplemented("flat merge").is_unimplemented());
        assert!(!AssemblerError::merge("x", MergeErrorKind::NoInputs).is_unimplemented());
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
