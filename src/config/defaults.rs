//! Fixed values written into every merged document.

/// Document format version
pub const SPDX_VERSION: &str = "SPDX-2.3";

/// Data license required by the SPDX specification
pub const DATA_LICENSE: &str = "CC0-1.0";

/// License list version used when no input declares one
pub const DEFAULT_LICENSE_LIST_VERSION: &str = "3.19";

/// Namespace prefix for generated documents
pub const NAMESPACE_PREFIX: &str = "https://spdx.org/spdxdocs";

/// Example merge configuration printed by `generate-config`.
#[must_use]
pub fn generate_example_config() -> String {
    r#"# sbom-assembler merge configuration
app:
  name: my-product
  version: "1.0.0"
  description: Product assembled from component SBOMs
  primary_purpose: application
  supplier:
    name: Example Corp
    value: https://example.com
  authors:
    - name: Jane Doe
      value: jane@example.com
  license:
    id: Apache-2.0
    expression: ""
  purl: pkg:generic/my-product@1.0.0
  cpe: ""
  copyright: "Copyright 2024 Example Corp"
  checksums:
    - algorithm: SHA256
      value: ""

input:
  files:
    - service-a.spdx.json
    - service-b.spdx.json

output:
  # omit to write to stdout
  file: my-product.spdx.json
  format: json

assemble:
  flat_merge: false
"#
    .to_string()
}
