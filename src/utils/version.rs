//! Lenient version parsing.

use semver::Version;

/// Parse a version string leniently.
///
/// Accepts a leading `v` and one- or two-component cores (`3`, `3.19`),
/// padding the missing components with zero before handing the result to
/// [`semver`]. Pre-release and build suffixes are kept.
pub fn parse_lenient(raw: &str) -> Result<Version, semver::Error> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split);

    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => trimmed.to_string(),
    };
    Version::parse(&padded)
}
