//! Configuration validation for sbom-assembler.
//!
//! Provides validation traits and implementations for edit and merge
//! configuration. The engines assume validated input.

use super::types::*;
use crate::model::{ChecksumAlgorithm, PrimaryPurpose};
use std::str::FromStr;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Field checks
// ============================================================================

fn check_purl(field: &str, purl: &str, errors: &mut Vec<ConfigError>) {
    if let Err(e) = packageurl::PackageUrl::from_str(purl) {
        errors.push(ConfigError::new(field, format!("Invalid package URL '{purl}': {e}")));
    }
}

fn check_cpe(field: &str, cpe: &str, errors: &mut Vec<ConfigError>) {
    if !cpe.starts_with("cpe:2.3:") && !cpe.starts_with("cpe:/") {
        errors.push(ConfigError::new(
            field,
            format!("Invalid CPE '{cpe}': expected 'cpe:2.3:' or 'cpe:/' prefix"),
        ));
    }
}

fn check_license(field: &str, license: &LicenseSpec, errors: &mut Vec<ConfigError>) {
    for expr in [&license.id, &license.expression] {
        if expr.is_empty() || expr == crate::model::NOASSERTION {
            continue;
        }
        if spdx::Expression::parse_mode(expr, spdx::ParseMode::LAX).is_err() {
            errors.push(ConfigError::new(
                field,
                format!("'{expr}' is not a valid SPDX license expression"),
            ));
        }
    }
}

fn check_hashes(field: &str, hashes: &[HashSpec], errors: &mut Vec<ConfigError>) {
    for hash in hashes {
        if ChecksumAlgorithm::lookup(&hash.algorithm).is_none() {
            errors.push(ConfigError::new(
                field,
                format!("Unknown checksum algorithm '{}'", hash.algorithm),
            ));
        }
        if !hash.value.chars().all(|c| c.is_ascii_hexdigit()) {
            errors.push(ConfigError::new(
                field,
                format!("Checksum value for {} is not hex", hash.algorithm),
            ));
        }
    }
}

fn check_purpose(field: &str, purpose: &str, errors: &mut Vec<ConfigError>) {
    if PrimaryPurpose::lookup(purpose).is_none() {
        errors.push(ConfigError::new(
            field,
            format!("Unknown primary purpose '{purpose}'"),
        ));
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for EditConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.search.subject == Subject::ComponentNameVersion
            && self.search.name.as_deref().map_or(true, str::is_empty)
        {
            errors.push(ConfigError::new(
                "search.name",
                "component-name-version search requires a component name",
            ));
        }

        let fields = &self.fields;
        if let Some(purl) = &fields.purl {
            check_purl("fields.purl", purl, &mut errors);
        }
        if let Some(cpe) = &fields.cpe {
            check_cpe("fields.cpe", cpe, &mut errors);
        }
        for license in &fields.licenses {
            check_license("fields.licenses", license, &mut errors);
        }
        check_hashes("fields.hashes", &fields.hashes, &mut errors);
        // primary purpose is validated at apply time and reported as invalid input

        errors
    }
}

impl Validatable for MergeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.app.validate());

        if self.input.files.is_empty() {
            errors.push(ConfigError::new("input.files", "At least one input file is required"));
        }

        errors
    }
}

impl Validatable for AppMetadata {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ConfigError::new("app.name", "Application name is required"));
        }
        if !self.purl.is_empty() {
            check_purl("app.purl", &self.purl, &mut errors);
        }
        if !self.cpe.is_empty() {
            check_cpe("app.cpe", &self.cpe, &mut errors);
        }
        if !self.primary_purpose.is_empty() {
            check_purpose("app.primary_purpose", &self.primary_purpose, &mut errors);
        }
        check_license("app.license", &self.license, &mut errors);
        check_hashes("app.checksums", &self.checksums, &mut errors);

        errors
    }
}
