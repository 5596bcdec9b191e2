//! The ordered table of field handlers.
//!
//! Every editable field is a [`FieldHandler`] variant. Handlers run in
//! [`FieldHandler::ALL`] order; each one yields a [`FieldOutcome`] and never
//! aborts the remaining fields.

use super::policy::Policy;
use super::resolver::Resolved;
use crate::config::{FieldValues, NameValue, Subject, ToolIdentity};
use crate::model::{
    Checksum, ChecksumAlgorithm, Component, Creator, CreatorType, Document, ExternalRef,
    ExternalRefType, PrimaryPurpose, Supplier,
};
use chrono::{DateTime, Utc};
use std::fmt;

/// Result of running one field handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The value was written
    Applied,
    /// The policy left the existing value in place
    Unchanged,
    /// Nothing configured for this field
    NoConfiguration,
    /// The field does not apply to the resolved subject
    NotSupported(&'static str),
    /// The configured value is outside the field's vocabulary
    InvalidInput(String),
}

impl FieldOutcome {
    fn from_written(written: bool) -> Self {
        if written {
            Self::Applied
        } else {
            Self::Unchanged
        }
    }
}

impl fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::NoConfiguration => write!(f, "no-configuration"),
            Self::NotSupported(reason) => write!(f, "not-supported ({reason})"),
            Self::InvalidInput(msg) => write!(f, "invalid-input ({msg})"),
        }
    }
}

/// Where a field may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// Component subjects only
    Component,
    /// Document subject only
    Document,
    /// Document or component, with a different target slot for each
    Either,
    /// Document metadata, written on every run whatever the subject
    Always,
}

/// What the handlers write into: the document plus the resolved subject.
pub struct EditTarget<'a> {
    doc: &'a mut Document,
    subject: Subject,
    component: Option<usize>,
}

impl<'a> EditTarget<'a> {
    #[must_use]
    pub fn new(doc: &'a mut Document, subject: Subject, resolved: Option<Resolved>) -> Self {
        let component = match resolved {
            Some(Resolved::Component(index)) => Some(index),
            _ => None,
        };
        Self {
            doc,
            subject,
            component,
        }
    }

    fn component_mut(&mut self) -> Option<&mut Component> {
        let index = self.component?;
        self.doc.components.get_mut(index)
    }
}

/// Per-run values shared by every handler.
#[derive(Debug, Clone)]
pub struct EditContext<'a> {
    pub tool: &'a ToolIdentity,
    pub now: DateTime<Utc>,
}

/// One editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldHandler {
    Name,
    Version,
    Supplier,
    Authors,
    Purl,
    Cpe,
    Licenses,
    Hashes,
    Tools,
    Copyright,
    LifecycleStages,
    Description,
    Repository,
    PrimaryPurpose,
    Timestamp,
}

impl FieldHandler {
    /// Handlers in application order.
    pub const ALL: [Self; 15] = [
        Self::Name,
        Self::Version,
        Self::Supplier,
        Self::Authors,
        Self::Purl,
        Self::Cpe,
        Self::Licenses,
        Self::Hashes,
        Self::Tools,
        Self::Copyright,
        Self::LifecycleStages,
        Self::Description,
        Self::Repository,
        Self::PrimaryPurpose,
        Self::Timestamp,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Version => "version",
            Self::Supplier => "supplier",
            Self::Authors => "authors",
            Self::Purl => "purl",
            Self::Cpe => "cpe",
            Self::Licenses => "licenses",
            Self::Hashes => "hashes",
            Self::Tools => "tools",
            Self::Copyright => "copyright",
            Self::LifecycleStages => "lifecycle-stages",
            Self::Description => "description",
            Self::Repository => "repository",
            Self::PrimaryPurpose => "primary-purpose",
            Self::Timestamp => "timestamp",
        }
    }

    #[must_use]
    pub const fn scope(self) -> FieldScope {
        match self {
            Self::Authors | Self::LifecycleStages => FieldScope::Document,
            Self::Licenses | Self::Description => FieldScope::Either,
            Self::Tools | Self::Timestamp => FieldScope::Always,
            _ => FieldScope::Component,
        }
    }

    fn is_configured(self, values: &FieldValues) -> bool {
        match self {
            Self::Name => values.name.is_some(),
            Self::Version => values.version.is_some(),
            Self::Supplier => values.supplier.is_some(),
            Self::Authors => !values.authors.is_empty(),
            Self::Purl => values.purl.is_some(),
            Self::Cpe => values.cpe.is_some(),
            Self::Licenses => !values.licenses.is_empty(),
            Self::Hashes => !values.hashes.is_empty(),
            Self::Copyright => values.copyright.is_some(),
            Self::LifecycleStages => !values.lifecycles.is_empty(),
            Self::Description => values.description.is_some(),
            Self::Repository => values.repository.is_some(),
            Self::PrimaryPurpose => values.primary_purpose.is_some(),
            Self::Tools | Self::Timestamp => true,
        }
    }

    fn check_scope(self, target: &EditTarget<'_>) -> Result<(), &'static str> {
        let on_document = target.subject == Subject::Document;
        match self.scope() {
            FieldScope::Always => Ok(()),
            FieldScope::Document if on_document => Ok(()),
            FieldScope::Document => Err("document-only field"),
            FieldScope::Component if on_document => Err("component-only field"),
            FieldScope::Component | FieldScope::Either if on_document => Ok(()),
            FieldScope::Component | FieldScope::Either => match target.component {
                Some(_) => Ok(()),
                None => Err("no component resolved"),
            },
        }
    }

    /// Run this handler against the target.
    pub fn apply(
        self,
        target: &mut EditTarget<'_>,
        policy: Policy,
        values: &FieldValues,
        ctx: &EditContext<'_>,
    ) -> FieldOutcome {
        if !self.is_configured(values) {
            return FieldOutcome::NoConfiguration;
        }
        if let Err(reason) = self.check_scope(target) {
            return FieldOutcome::NotSupported(reason);
        }

        match self {
            Self::Tools => return apply_tools(target.doc, &values.tools, ctx.tool),
            Self::Timestamp => {
                target.doc.creation_info_mut().created = Some(ctx.now);
                return FieldOutcome::Applied;
            }
            Self::Authors => {
                let authors: Vec<Creator> = values
                    .authors
                    .iter()
                    .filter(|a| !a.is_empty())
                    .map(|a| Creator::person(a.display()))
                    .collect();
                let creators = &mut target.doc.creation_info_mut().creators;
                return FieldOutcome::from_written(policy.apply_list(creators, authors));
            }
            Self::LifecycleStages => {
                let comment = format!("lifecycle: {}", values.lifecycles.join(","));
                let slot = &mut target.doc.creation_info_mut().comment;
                return FieldOutcome::from_written(policy.apply_scalar(slot, comment));
            }
            Self::Licenses => {
                let joined = join_licenses(values);
                if joined.is_empty() {
                    return FieldOutcome::InvalidInput("empty license".to_string());
                }
                let doc = &mut *target.doc;
                let slot = match target.component {
                    Some(index) => match doc.components.get_mut(index) {
                        Some(component) => &mut component.license_concluded,
                        None => return FieldOutcome::NotSupported("no component resolved"),
                    },
                    None => &mut doc.data_license,
                };
                return FieldOutcome::from_written(policy.apply_scalar(slot, joined));
            }
            Self::Description if target.subject == Subject::Document => {
                let value = values.description.clone().unwrap_or_default();
                let slot = &mut target.doc.comment;
                return FieldOutcome::from_written(policy.apply_scalar(slot, value));
            }
            _ => {}
        }

        match target.component_mut() {
            Some(component) => apply_component(self, component, policy, values),
            None => FieldOutcome::NotSupported("no component resolved"),
        }
    }
}

impl fmt::Display for FieldHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn apply_component(
    field: FieldHandler,
    component: &mut Component,
    policy: Policy,
    values: &FieldValues,
) -> FieldOutcome {
    let scalar = |slot: &mut String, value: &Option<String>| {
        let value = value.clone().unwrap_or_default();
        FieldOutcome::from_written(policy.apply_scalar(slot, value))
    };

    match field {
        FieldHandler::Name => scalar(&mut component.name, &values.name),
        FieldHandler::Version => scalar(&mut component.version, &values.version),
        FieldHandler::Copyright => scalar(&mut component.copyright_text, &values.copyright),
        FieldHandler::Description => scalar(&mut component.description, &values.description),
        FieldHandler::Repository => scalar(&mut component.download_location, &values.repository),
        FieldHandler::Supplier => {
            let supplier = values
                .supplier
                .as_ref()
                .map(|s| Supplier::organization(s.display()));
            FieldOutcome::from_written(policy.apply_scalar(&mut component.supplier, supplier))
        }
        FieldHandler::Purl => {
            let locator = values.purl.clone().unwrap_or_default();
            apply_external_ref(component, policy, ExternalRef::purl(locator))
        }
        FieldHandler::Cpe => {
            let locator = values.cpe.clone().unwrap_or_default();
            apply_external_ref(component, policy, ExternalRef::cpe(locator))
        }
        FieldHandler::Hashes => {
            let checksums: Vec<Checksum> = values
                .hashes
                .iter()
                .filter(|h| !h.value.is_empty())
                .map(|h| Checksum::new(ChecksumAlgorithm::from(h.algorithm.clone()), &h.value))
                .collect();
            FieldOutcome::from_written(policy.apply_list(&mut component.checksums, checksums))
        }
        FieldHandler::PrimaryPurpose => {
            let raw = values.primary_purpose.as_deref().unwrap_or_default();
            match PrimaryPurpose::lookup(raw) {
                Some(purpose) => FieldOutcome::from_written(
                    policy.apply_scalar(&mut component.primary_purpose, Some(purpose)),
                ),
                None => FieldOutcome::InvalidInput(format!("unknown primary purpose '{raw}'")),
            }
        }
        _ => FieldOutcome::NotSupported("not a component field"),
    }
}

fn apply_external_ref(component: &mut Component, policy: Policy, reference: ExternalRef) -> FieldOutcome {
    let kind: ExternalRefType = reference.reference_type.clone();
    let written = policy.apply_keyed(&mut component.external_refs, reference, |r| {
        r.reference_type == kind
    });
    FieldOutcome::from_written(written)
}

fn join_licenses(values: &FieldValues) -> String {
    values
        .licenses
        .iter()
        .map(crate::config::LicenseSpec::effective)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn tool_display(tool: &NameValue) -> String {
    if tool.value.is_empty() {
        tool.name.clone()
    } else {
        format!("{}-{}", tool.name, tool.value)
    }
}

/// Merge configured tools into the creators and stamp the running tool.
///
/// Previous self-entries (tool creators starting with the tool's name) are
/// replaced by exactly one entry. A configured tool sharing that prefix
/// overrides the default `name-version` stamp. Other tools are added when
/// no creator with the same display string exists.
fn apply_tools(doc: &mut Document, tools: &[NameValue], identity: &ToolIdentity) -> FieldOutcome {
    let mut stamp = Creator::tool(identity.display_name());
    let mut others = Vec::new();
    for tool in tools.iter().filter(|t| !t.is_empty()) {
        let display = tool_display(tool);
        if display.starts_with(&identity.name) {
            stamp = Creator::tool(display);
        } else {
            others.push(Creator::tool(display));
        }
    }

    let creators = &mut doc.creation_info_mut().creators;
    creators.retain(|c| !(c.creator_type == CreatorType::Tool && c.name.starts_with(&identity.name)));
    for tool in others {
        if !creators.iter().any(|c| c.name == tool.name) {
            creators.push(tool);
        }
    }
    creators.push(stamp);

    FieldOutcome::Applied
}
