//! License-list version reconciliation across merge inputs.

use crate::config::DEFAULT_LICENSE_LIST_VERSION;
use crate::error::{AssemblerError, MergeErrorKind, Result};
use crate::model::Document;
use crate::utils::parse_lenient;
use indexmap::IndexSet;

/// Pick the license-list version for the merged document.
///
/// No declared versions gives the baseline, one distinct version is used
/// verbatim, and several are compared as semantic versions with the lowest
/// winning. The winner is returned exactly as it was written in its input.
pub fn reconcile<'a>(versions: impl IntoIterator<Item = &'a str>) -> Result<String> {
    let distinct: IndexSet<&str> = versions
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    match distinct.len() {
        0 => Ok(DEFAULT_LICENSE_LIST_VERSION.to_string()),
        1 => Ok(distinct[0].to_string()),
        _ => {
            let mut parsed = Vec::with_capacity(distinct.len());
            for raw in &distinct {
                let version = parse_lenient(raw).map_err(|e| {
                    AssemblerError::merge(
                        "license list version reconciliation",
                        MergeErrorKind::VersionParse {
                            version: (*raw).to_string(),
                            reason: e.to_string(),
                        },
                    )
                })?;
                parsed.push((version, *raw));
            }
            parsed.sort_by(|a, b| a.0.cmp(&b.0));
            Ok(parsed
                .first()
                .map_or(DEFAULT_LICENSE_LIST_VERSION, |(_, raw)| *raw)
                .to_string())
        }
    }
}

/// License-list versions declared by each input, in input order.
pub fn declared_versions(inputs: &[Document]) -> impl Iterator<Item = &str> {
    inputs
        .iter()
        .filter_map(|doc| doc.creation_info.as_ref())
        .map(|info| info.license_list_version.as_str())
}
