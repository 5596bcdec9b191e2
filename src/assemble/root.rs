//! Synthesis of the merged document's root component.

use crate::config::AppMetadata;
use crate::model::{
    Checksum, ChecksumAlgorithm, Component, ElementIdGenerator, ExternalRef, PrimaryPurpose,
    Supplier, NOASSERTION,
};

/// Build the root component from application metadata.
///
/// The root gets a fresh `SPDXRef-RootPackage-<uuid>` identifier, so it
/// cannot collide with anything copied from an input.
#[must_use]
pub fn synthesize_root(app: &AppMetadata) -> Component {
    let mut root = Component::new(ElementIdGenerator::fresh("RootPackage"), &app.name)
        .with_version(&app.version);
    root.download_location = NOASSERTION.to_string();
    root.files_analyzed = Some(false);

    root.supplier = Some(if app.supplier.is_empty() {
        Supplier::no_assertion()
    } else {
        Supplier::organization(app.supplier.display())
    });

    root.checksums = app
        .checksums
        .iter()
        .filter(|c| !c.value.is_empty())
        .map(|c| Checksum::new(ChecksumAlgorithm::from(c.algorithm.clone()), &c.value))
        .collect();

    let license = &app.license;
    if !license.expression.is_empty() && license.id.is_empty() {
        // a bare expression is not asserted on the root
        root.license_concluded = NOASSERTION.to_string();
        root.license_declared = NOASSERTION.to_string();
    } else if !license.effective().is_empty() {
        root.license_concluded = license.effective().to_string();
        root.license_declared = root.license_concluded.clone();
    }

    root.copyright_text = if app.copyright.is_empty() {
        NOASSERTION.to_string()
    } else {
        app.copyright.clone()
    };
    root.description.clone_from(&app.description);
    root.primary_purpose = PrimaryPurpose::lookup(&app.primary_purpose);

    if !app.purl.is_empty() {
        root.external_refs.push(ExternalRef::purl(&app.purl));
    }
    if !app.cpe.is_empty() {
        root.external_refs.push(ExternalRef::cpe(&app.cpe));
    }

    root
}
