//! Hierarchical merge engine.

use super::license_list;
use super::root::synthesize_root;
use crate::config::{
    AppMetadata, OutputFormat, ToolIdentity, DATA_LICENSE, NAMESPACE_PREFIX, SPDX_VERSION,
};
use crate::error::{AssemblerError, MergeErrorKind, Result};
use crate::model::{
    utc_now, CreationInfo, Creator, Document, ElementIdGenerator, Relationship, DOCUMENT_ID,
};
use crate::pipeline::{write_document, OutputTarget};
use crate::utils::sanitize_name;
use std::fmt;

/// Stages of a merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStage {
    #[default]
    Init,
    SynthesizeRoot,
    Ingest,
    Finalize,
    Serialize,
    Done,
    Aborted,
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Init => "init",
            Self::SynthesizeRoot => "synthesize-root",
            Self::Ingest => "ingest",
            Self::Finalize => "finalize",
            Self::Serialize => "serialize",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// How inputs are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// New root component containing every input's described components
    #[default]
    Hierarchical,
    /// Collapse inputs without a synthesized root (not implemented)
    Flat,
}

/// Counts collected during a merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of input documents
    pub inputs: usize,
    /// Components in the output, root included
    pub components: usize,
    /// Input components re-parented under the root
    pub described: usize,
    /// Input components skipped because they could not be copied
    pub clone_failures: usize,
    /// Relationships in the output
    pub relationships: usize,
    /// Relationships whose endpoints do not resolve in the output
    pub dangling_relationships: usize,
    pub files: usize,
    pub other_licenses: usize,
    /// Bytes written by the serialize stage
    pub bytes_written: usize,
    /// Last stage reached
    pub stage: MergeStage,
}

impl MergeReport {
    fn enter(&mut self, stage: MergeStage) {
        tracing::debug!("Merge stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    /// Log a summary of the merge
    pub fn log_summary(&self) {
        tracing::info!(
            "Merged {} SBOMs: {} components ({} described, {} skipped), \
             {} relationships, {} files, {} other licenses",
            self.inputs,
            self.components,
            self.described,
            self.clone_failures,
            self.relationships,
            self.files,
            self.other_licenses
        );
    }
}

/// Builds one document out of several.
pub struct MergeEngine {
    app: AppMetadata,
    tool: ToolIdentity,
}

impl MergeEngine {
    /// Create an engine for pre-validated application metadata.
    #[must_use]
    pub const fn new(app: AppMetadata, tool: ToolIdentity) -> Self {
        Self { app, tool }
    }

    /// Merge with the given mode.
    pub fn merge(&self, inputs: &[Document], mode: MergeMode) -> Result<(Document, MergeReport)> {
        match mode {
            MergeMode::Hierarchical => self.hierarchical_merge(inputs),
            MergeMode::Flat => self.flat_merge(inputs),
        }
    }

    /// Merge and write the result to `target` in one write.
    ///
    /// Nothing is written unless every earlier stage succeeded.
    pub fn run(
        &self,
        inputs: &[Document],
        mode: MergeMode,
        target: &OutputTarget,
        format: OutputFormat,
    ) -> Result<MergeReport> {
        let (doc, mut report) = self.merge(inputs, mode)?;

        report.enter(MergeStage::Serialize);
        match write_document(&doc, target, format) {
            Ok(bytes) => {
                report.bytes_written = bytes;
                report.enter(MergeStage::Done);
                tracing::debug!("Wrote {} bytes to {}", bytes, target);
                Ok(report)
            }
            Err(e) => {
                report.enter(MergeStage::Aborted);
                Err(e)
            }
        }
    }

    /// Merge inputs under a freshly synthesized root component.
    ///
    /// Inputs are never modified. Components that cannot be copied are
    /// skipped with a warning; an unparseable license-list version aborts.
    pub fn hierarchical_merge(&self, inputs: &[Document]) -> Result<(Document, MergeReport)> {
        let mut report = MergeReport {
            inputs: inputs.len(),
            ..Default::default()
        };
        if inputs.is_empty() {
            report.enter(MergeStage::Aborted);
            return Err(AssemblerError::merge("hierarchical merge", MergeErrorKind::NoInputs));
        }

        let mut out = match self.init(inputs) {
            Ok(out) => out,
            Err(e) => {
                report.enter(MergeStage::Aborted);
                return Err(e);
            }
        };

        report.enter(MergeStage::SynthesizeRoot);
        let root = synthesize_root(&self.app);
        tracing::debug!("Root component: {}", root.spdx_id);
        out.relationships
            .push(Relationship::describes(DOCUMENT_ID, &root.spdx_id));
        let root_id = root.spdx_id.clone();
        out.components.push(root);

        report.enter(MergeStage::Ingest);
        for (index, input) in inputs.iter().enumerate() {
            ingest(&mut out, &root_id, index, input, &mut report);
        }

        report.enter(MergeStage::Finalize);
        let dangling = out.dangling_relationships();
        for rel in &dangling {
            tracing::warn!(
                "Relationship {} {} {} has an unresolved endpoint",
                rel.ref_a,
                rel.relationship_type,
                rel.ref_b
            );
        }
        report.dangling_relationships = dangling.len();
        report.components = out.components.len();
        report.relationships = out.relationships.len();
        report.files = out.files.len();
        report.other_licenses = out.other_licenses.len();

        Ok((out, report))
    }

    /// Collapse inputs into one namespace without a root component.
    ///
    /// Not implemented: always fails, touching neither inputs nor output.
    pub fn flat_merge(&self, _inputs: &[Document]) -> Result<(Document, MergeReport)> {
        Err(AssemblerError::unimplemented("flat merge"))
    }

    /// Empty output document with fixed header fields and creation info.
    fn init(&self, inputs: &[Document]) -> Result<Document> {
        let license_list_version =
            license_list::reconcile(license_list::declared_versions(inputs))?;
        tracing::debug!(
            "License list version: {} (from {} inputs)",
            license_list_version,
            inputs.len()
        );

        let mut creators: Vec<Creator> = self
            .app
            .authors
            .iter()
            .filter(|a| !a.is_empty())
            .map(|a| Creator::organization(a.display()))
            .collect();
        creators.push(Creator::tool(self.tool.display_name()));

        Ok(Document {
            spdx_version: SPDX_VERSION.to_string(),
            data_license: DATA_LICENSE.to_string(),
            spdx_id: DOCUMENT_ID.to_string(),
            name: self.app.name.clone(),
            document_namespace: format!(
                "{NAMESPACE_PREFIX}/{}-{}",
                sanitize_name(&self.app.name),
                uuid::Uuid::new_v4()
            ),
            external_document_refs: inputs
                .iter()
                .flat_map(|doc| doc.external_document_refs.iter().cloned())
                .collect(),
            creation_info: Some(CreationInfo {
                created: Some(utc_now()),
                creators,
                comment: format!(
                    "Generated by {} using {} sboms",
                    self.tool.display_name(),
                    inputs.len()
                ),
                license_list_version,
            }),
            ..Default::default()
        })
    }
}

/// Append one input's content to the output.
fn ingest(out: &mut Document, root_id: &str, index: usize, input: &Document, report: &mut MergeReport) {
    tracing::debug!(
        "Ingesting input #{} '{}': {} components, {} files, {} relationships, {} other licenses",
        index,
        input.name,
        input.components.len(),
        input.files.len(),
        input.relationships.len(),
        input.other_licenses.len()
    );

    let described = input.described_ids();
    let mut relationships: Vec<Relationship> = input
        .relationships
        .iter()
        .filter(|r| !r.is_describes())
        .cloned()
        .collect();

    for component in &input.components {
        let mut copy = match component.detach() {
            Ok(copy) => copy,
            Err(e) => {
                tracing::warn!("Skipping component in input #{}: {}", index, e);
                report.clone_failures += 1;
                continue;
            }
        };

        if described.contains(component.spdx_id.as_str()) {
            let new_id = ElementIdGenerator::fresh("Package");
            out.relationships.push(Relationship::contains(root_id, &new_id));
            let rewritten: usize = relationships
                .iter_mut()
                .map(|r| r.rewrite_endpoint(&component.spdx_id, &new_id))
                .sum();
            tracing::debug!(
                "Described component {} -> {} ({} endpoints rewritten)",
                component.spdx_id,
                new_id,
                rewritten
            );
            copy.spdx_id = new_id;
            report.described += 1;
        }
        out.components.push(copy);
    }

    out.relationships.extend(relationships);
    out.files.extend(input.files.iter().cloned());
    out.other_licenses.extend(input.other_licenses.iter().cloned());
}
