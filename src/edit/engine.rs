//! Field reconciliation engine.

use super::fields::{EditContext, EditTarget, FieldHandler, FieldOutcome};
use super::resolver::{resolve, Resolved};
use crate::config::{EditConfig, Subject, ToolIdentity};
use crate::model::{utc_now, Document};

/// Outcome of one edit run, one entry per field in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReport {
    /// Requested subject
    pub subject: Subject,
    /// Identifier of the resolved component, if any
    pub component: Option<String>,
    /// Outcome per field handler
    pub outcomes: Vec<(FieldHandler, FieldOutcome)>,
}

impl EditReport {
    /// Outcome recorded for a field
    #[must_use]
    pub fn outcome(&self, field: FieldHandler) -> Option<&FieldOutcome> {
        self.outcomes
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, outcome)| outcome)
    }

    /// Number of fields that wrote a value
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == FieldOutcome::Applied)
            .count()
    }

    /// Fields that were rejected as invalid input
    pub fn invalid_fields(&self) -> impl Iterator<Item = (FieldHandler, &str)> {
        self.outcomes.iter().filter_map(|(f, o)| match o {
            FieldOutcome::InvalidInput(msg) => Some((*f, msg.as_str())),
            _ => None,
        })
    }
}

/// Applies an [`EditConfig`] to documents in place.
pub struct EditEngine {
    config: EditConfig,
    tool: ToolIdentity,
}

impl EditEngine {
    /// Create an engine for a pre-validated edit request.
    #[must_use]
    pub const fn new(config: EditConfig, tool: ToolIdentity) -> Self {
        Self { config, tool }
    }

    #[must_use]
    pub const fn config(&self) -> &EditConfig {
        &self.config
    }

    /// Resolve the subject and run every field handler against `doc`.
    ///
    /// Never fails: an unresolved component subject disables the
    /// component-scoped fields for this run and is reported per field.
    pub fn update(&self, doc: &mut Document) -> EditReport {
        let subject = self.config.search.subject;
        let resolved = match resolve(doc, &self.config.search) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                tracing::warn!("Subject {} not resolved: {}", subject, e);
                None
            }
        };

        let component = match resolved {
            Some(Resolved::Component(index)) => doc.components.get(index).map(|c| {
                tracing::debug!("Resolved {} to {} ({})", subject, c.spdx_id, c.name);
                c.spdx_id.clone()
            }),
            _ => None,
        };

        let ctx = EditContext {
            tool: &self.tool,
            now: utc_now(),
        };
        let mut target = EditTarget::new(doc, subject, resolved);
        let mut outcomes = Vec::with_capacity(FieldHandler::ALL.len());

        for field in FieldHandler::ALL {
            let outcome = field.apply(&mut target, self.config.policy, &self.config.fields, &ctx);
            match &outcome {
                FieldOutcome::NoConfiguration => {}
                FieldOutcome::NotSupported(reason) => {
                    tracing::info!("Field {} not supported for {}: {}", field, subject, reason);
                }
                FieldOutcome::InvalidInput(msg) => {
                    tracing::warn!("Field {} skipped: {}", field, msg);
                }
                FieldOutcome::Applied | FieldOutcome::Unchanged => {
                    tracing::debug!("Field {} {} (policy {})", field, outcome, self.config.policy);
                }
            }
            outcomes.push((field, outcome));
        }

        EditReport {
            subject,
            component,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldValues, SearchSpec};
    use crate::edit::Policy;
    use crate::model::{Component, CreatorType, Relationship, DOCUMENT_ID};

    fn doc() -> Document {
        Document {
            spdx_id: DOCUMENT_ID.to_string(),
            components: vec![Component::new("SPDXRef-app", "app")],
            relationships: vec![Relationship::describes(DOCUMENT_ID, "SPDXRef-app")],
            ..Default::default()
        }
    }

    fn engine(subject: Subject, policy: Policy, fields: FieldValues) -> EditEngine {
        EditEngine::new(
            EditConfig {
                search: SearchSpec {
                    subject,
                    ..Default::default()
                },
                policy,
                fields,
            },
            ToolIdentity::new("sbom-assembler", "0.1.0"),
        )
    }

    #[test]
    fn test_report_covers_every_field() {
        let mut d = doc();
        let report = engine(Subject::Document, Policy::Overwrite, FieldValues::default()).update(&mut d);
        assert_eq!(report.outcomes.len(), FieldHandler::ALL.len());
        assert_eq!(report.applied_count(), 2);
        assert_eq!(report.outcome(FieldHandler::Tools), Some(&FieldOutcome::Applied));
        assert_eq!(
            report.outcome(FieldHandler::Name),
            Some(&FieldOutcome::NoConfiguration)
        );
    }

    #[test]
    fn test_not_supported_does_not_abort_later_fields() {
        let mut d = doc();
        let fields = FieldValues {
            purl: Some("pkg:cargo/app@1.0".to_string()),
            description: Some("fleet".to_string()),
            ..Default::default()
        };
        let report = engine(Subject::Document, Policy::Overwrite, fields).update(&mut d);
        assert!(matches!(
            report.outcome(FieldHandler::Purl),
            Some(FieldOutcome::NotSupported(_))
        ));
        assert_eq!(report.outcome(FieldHandler::Description), Some(&FieldOutcome::Applied));
        assert_eq!(d.comment, "fleet");
        assert!(d.components[0].external_refs.is_empty());
    }

    #[test]
    fn test_invalid_input_reported() {
        let mut d = doc();
        let fields = FieldValues {
            primary_purpose: Some("gadget".to_string()),
            version: Some("2.0".to_string()),
            ..Default::default()
        };
        let report = engine(Subject::PrimaryComponent, Policy::Overwrite, fields).update(&mut d);
        assert_eq!(report.component.as_deref(), Some("SPDXRef-app"));
        assert_eq!(report.invalid_fields().count(), 1);
        assert_eq!(d.components[0].version, "2.0");
    }

    #[test]
    fn test_repeated_runs_keep_one_self_stamp() {
        let mut d = doc();
        let e = engine(Subject::Document, Policy::Missing, FieldValues::default());
        for _ in 0..4 {
            e.update(&mut d);
        }
        let stamps = d
            .creation_info
            .as_ref()
            .unwrap()
            .creators
            .iter()
            .filter(|c| c.creator_type == CreatorType::Tool && c.name == "sbom-assembler-0.1.0")
            .count();
        assert_eq!(stamps, 1);
    }

    #[test]
    fn test_unresolved_component_skips_component_fields() {
        let mut d = doc();
        d.relationships.clear();
        let fields = FieldValues {
            name: Some("widget".to_string()),
            ..Default::default()
        };
        let report = engine(Subject::PrimaryComponent, Policy::Overwrite, fields).update(&mut d);
        assert!(report.component.is_none());
        assert_eq!(
            report.outcome(FieldHandler::Name),
            Some(&FieldOutcome::NotSupported("no component resolved"))
        );
        assert_eq!(d.components[0].name, "app");
        assert!(d.creation_info.as_ref().unwrap().created.is_some());
    }
}
