//! Edit engine integration tests.
//!
//! Exercise subject resolution, update policies and the tool stamp against
//! the SPDX fixtures, through both the library engine and the CLI handler.

use sbom_assembler::cli::run_edit;
use sbom_assembler::config::{
    EditConfig, FieldValues, NameValue, OutputFormat, SearchSpec, Subject, ToolIdentity,
};
use sbom_assembler::edit::{EditEngine, FieldHandler, FieldOutcome, Policy};
use sbom_assembler::model::{CreatorType, Document, ExternalRefType};
use sbom_assembler::parsers::load_document;
use sbom_assembler::pipeline::OutputTarget;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn frontend() -> Document {
    load_document(&fixture_path("spdx/frontend.spdx.json")).expect("fixture should load")
}

fn tool() -> ToolIdentity {
    ToolIdentity::new("sbom-assembler", "0.1.0")
}

fn edit(subject: Subject, policy: Policy, fields: FieldValues) -> EditEngine {
    EditEngine::new(
        EditConfig {
            search: SearchSpec {
                subject,
                ..Default::default()
            },
            policy,
            fields,
        },
        tool(),
    )
}

fn purls(doc: &Document, id: &str) -> Vec<String> {
    doc.get_component(id)
        .expect("component should exist")
        .external_refs
        .iter()
        .filter(|r| r.reference_type == ExternalRefType::Purl)
        .map(|r| r.reference_locator.clone())
        .collect()
}

fn tool_stamps(doc: &Document) -> usize {
    doc.creation_info
        .as_ref()
        .map_or(0, |info| {
            info.creators
                .iter()
                .filter(|c| c.creator_type == CreatorType::Tool && c.name.starts_with("sbom-assembler"))
                .count()
        })
}

// ============================================================================
// Policies
// ============================================================================

mod policies {
    use super::*;

    #[test]
    fn missing_policy_keeps_existing_name() {
        let mut doc = frontend();
        let engine = edit(
            Subject::PrimaryComponent,
            Policy::Missing,
            FieldValues {
                name: Some("renamed".to_string()),
                description: Some("Web UI".to_string()),
                ..Default::default()
            },
        );

        let report = engine.update(&mut doc);
        let component = doc.get_component("SPDXRef-frontend").unwrap();

        assert_eq!(component.name, "frontend");
        assert_eq!(component.description, "Web UI");
        assert_eq!(report.outcome(FieldHandler::Name), Some(&FieldOutcome::Unchanged));
        assert_eq!(report.outcome(FieldHandler::Description), Some(&FieldOutcome::Applied));
    }

    #[test]
    fn append_purl_keeps_the_existing_one() {
        let mut doc = frontend();
        let engine = edit(
            Subject::PrimaryComponent,
            Policy::Append,
            FieldValues {
                purl: Some("pkg:npm/%40acme/frontend@1.4.0".to_string()),
                ..Default::default()
            },
        );

        engine.update(&mut doc);

        assert_eq!(
            purls(&doc, "SPDXRef-frontend"),
            vec!["pkg:npm/frontend@1.4.0", "pkg:npm/%40acme/frontend@1.4.0"]
        );
    }

    #[test]
    fn overwrite_purl_leaves_exactly_one() {
        let mut doc = frontend();
        let engine = edit(
            Subject::PrimaryComponent,
            Policy::Overwrite,
            FieldValues {
                purl: Some("pkg:npm/frontend@2.0.0".to_string()),
                ..Default::default()
            },
        );

        engine.update(&mut doc);
        engine.update(&mut doc);

        assert_eq!(purls(&doc, "SPDXRef-frontend"), vec!["pkg:npm/frontend@2.0.0"]);
    }

    #[test]
    fn name_version_search_edits_a_dependency() {
        let mut doc = frontend();
        let engine = EditEngine::new(
            EditConfig {
                search: SearchSpec {
                    subject: Subject::ComponentNameVersion,
                    name: Some("react".to_string()),
                    version: Some("18.2.0".to_string()),
                },
                policy: Policy::Overwrite,
                fields: FieldValues {
                    supplier: Some(NameValue::new("Meta", "https://react.dev")),
                    ..Default::default()
                },
            },
            tool(),
        );

        let report = engine.update(&mut doc);

        assert_eq!(report.component.as_deref(), Some("SPDXRef-react"));
        let supplier = doc.get_component("SPDXRef-react").unwrap().supplier.clone();
        assert_eq!(supplier.map(|s| s.name), Some("Meta (https://react.dev)".to_string()));
    }
}

// ============================================================================
// Subject scope
// ============================================================================

mod scope {
    use super::*;

    #[test]
    fn component_field_on_document_is_not_supported() {
        let mut doc = frontend();
        let before = doc.clone();
        let engine = edit(
            Subject::Document,
            Policy::Overwrite,
            FieldValues {
                purl: Some("pkg:npm/other@1.0.0".to_string()),
                ..Default::default()
            },
        );

        let report = engine.update(&mut doc);

        assert!(matches!(
            report.outcome(FieldHandler::Purl),
            Some(FieldOutcome::NotSupported(_))
        ));
        assert_eq!(doc.components, before.components);
        assert_eq!(doc.relationships, before.relationships);
    }

    #[test]
    fn unresolved_component_still_stamps_the_tool() {
        let mut doc = frontend();
        let engine = EditEngine::new(
            EditConfig {
                search: SearchSpec {
                    subject: Subject::ComponentNameVersion,
                    name: Some("does-not-exist".to_string()),
                    version: None,
                },
                policy: Policy::Overwrite,
                fields: FieldValues {
                    version: Some("9.9.9".to_string()),
                    ..Default::default()
                },
            },
            tool(),
        );

        let report = engine.update(&mut doc);

        assert!(report.component.is_none());
        assert!(matches!(
            report.outcome(FieldHandler::Version),
            Some(FieldOutcome::NotSupported(_))
        ));
        assert_eq!(report.outcome(FieldHandler::Tools), Some(&FieldOutcome::Applied));
        assert_eq!(tool_stamps(&doc), 1);
    }

    #[test]
    fn document_authors_become_person_creators() {
        let mut doc = frontend();
        let engine = edit(
            Subject::Document,
            Policy::Append,
            FieldValues {
                authors: vec![NameValue::new("Jane Doe", "jane@acme.io")],
                ..Default::default()
            },
        );

        engine.update(&mut doc);

        let creators = &doc.creation_info.as_ref().unwrap().creators;
        assert!(creators
            .iter()
            .any(|c| c.creator_type == CreatorType::Person && c.name == "Jane Doe (jane@acme.io)"));
        // existing creators survive an append
        assert!(creators.iter().any(|c| c.name == "syft-0.100.0"));
    }
}

// ============================================================================
// Tool stamp
// ============================================================================

mod tool_stamp {
    use super::*;

    #[test]
    fn repeated_edits_keep_one_stamp() {
        let mut doc = frontend();
        let engine = edit(Subject::Document, Policy::Append, FieldValues::default());

        for _ in 0..3 {
            engine.update(&mut doc);
        }

        assert_eq!(tool_stamps(&doc), 1);
    }

    #[test]
    fn newer_version_replaces_older_stamp() {
        let mut doc = frontend();
        edit(Subject::Document, Policy::Overwrite, FieldValues::default()).update(&mut doc);

        let newer = EditEngine::new(EditConfig::default(), ToolIdentity::new("sbom-assembler", "0.2.0"));
        newer.update(&mut doc);

        let creators = &doc.creation_info.as_ref().unwrap().creators;
        assert!(creators.iter().any(|c| c.name == "sbom-assembler-0.2.0"));
        assert!(!creators.iter().any(|c| c.name == "sbom-assembler-0.1.0"));
    }
}

// ============================================================================
// CLI handler
// ============================================================================

mod cli_handler {
    use super::*;

    #[test]
    fn edit_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("edited.spdx.json");
        let config = EditConfig {
            search: SearchSpec {
                subject: Subject::PrimaryComponent,
                ..Default::default()
            },
            policy: Policy::Overwrite,
            fields: FieldValues {
                version: Some("1.5.0".to_string()),
                ..Default::default()
            },
        };

        let report = run_edit(
            &fixture_path("spdx/frontend.spdx.json"),
            &OutputTarget::File(output.clone()),
            OutputFormat::Json,
            config,
            tool(),
            true,
        )
        .expect("edit should succeed");

        assert_eq!(report.outcome(FieldHandler::Version), Some(&FieldOutcome::Applied));
        let written = load_document(&output).expect("output should parse");
        assert_eq!(written.get_component("SPDXRef-frontend").unwrap().version, "1.5.0");
        // untouched content round-trips
        assert_eq!(written.files.len(), 1);
        assert_eq!(written.relationships.len(), 3);
    }

    #[test]
    fn edit_rejects_invalid_purl_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("edited.spdx.json");
        let config = EditConfig {
            search: SearchSpec {
                subject: Subject::PrimaryComponent,
                ..Default::default()
            },
            policy: Policy::Overwrite,
            fields: FieldValues {
                purl: Some("not a purl".to_string()),
                ..Default::default()
            },
        };

        let result = run_edit(
            &fixture_path("spdx/frontend.spdx.json"),
            &OutputTarget::File(output.clone()),
            OutputFormat::Json,
            config,
            tool(),
            true,
        );

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
