//! Shared utilities.

mod version;

pub use version::parse_lenient;

/// Lowercase `name` and replace anything outside `[a-z0-9.-]` with `-`.
///
/// Used to build document namespaces from product names.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "sbom".to_string()
    } else {
        cleaned
    }
}
