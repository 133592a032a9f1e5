// rulebook-core/src/application/report.rs

// Two-phase report lifecycle: collect rule sources and results while the rule
// engine runs, then resolve the narrative documents and render them one by one.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::result::{ExecutionResult, normalize};
use crate::domain::rule::{Concept, Constraint, Group, Rule, RuleSource};
use crate::domain::store::ResultStore;
use crate::error::ReportError;
use crate::infrastructure::config::{ReportContext, ReportOptions};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::ensure_dir;
use crate::infrastructure::labeler::DefaultLabeler;
use crate::infrastructure::source_resolver::{FileGroups, SourceResolver};
use crate::ports::labeler::Labeler;
use crate::ports::renderer::{Backend, DocumentRenderer, RenderOptions, SafeMode};

/// Sub-directory of the report root used when no report directory is configured.
pub const DEFAULT_REPORT_DIRECTORY: &str = "narrative";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPhase {
    Unconfigured,
    Configured,
    Collecting,
    Rendering,
}

impl fmt::Display for ReportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unconfigured => "unconfigured",
            Self::Configured => "configured",
            Self::Collecting => "collecting",
            Self::Rendering => "rendering",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub source: PathBuf,
    pub base_dir: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderSummary {
    pub documents: Vec<RenderedDocument>,
}

impl RenderSummary {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

pub struct NarrativeReport<R, L = DefaultLabeler> {
    renderer: R,
    labeler: L,
    phase: ReportPhase,
    report_directory: Option<PathBuf>,
    resolver: Option<SourceResolver>,
    rule_sources: HashSet<RuleSource>,
    results: Arc<ResultStore>,
}

impl<R: DocumentRenderer> NarrativeReport<R, DefaultLabeler> {
    pub fn new(renderer: R) -> Self {
        Self::with_labeler(renderer, DefaultLabeler)
    }
}

impl<R: DocumentRenderer, L: Labeler> NarrativeReport<R, L> {
    pub fn with_labeler(renderer: R, labeler: L) -> Self {
        Self {
            renderer,
            labeler,
            phase: ReportPhase::Unconfigured,
            report_directory: None,
            resolver: None,
            rule_sources: HashSet::new(),
            results: Arc::new(ResultStore::new()),
        }
    }

    pub fn phase(&self) -> ReportPhase {
        self.phase
    }

    pub fn report_directory(&self) -> Option<&Path> {
        self.report_directory.as_deref()
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn rule_sources(&self) -> &HashSet<RuleSource> {
        &self.rule_sources
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[instrument(skip_all)]
    pub fn configure(
        &mut self,
        context: &ReportContext,
        options: &ReportOptions,
    ) -> Result<(), ReportError> {
        self.expect_phase("configure", &[ReportPhase::Unconfigured, ReportPhase::Configured])?;
        options.validate().map_err(InfrastructureError::from)?;

        let directory = options
            .report_directory
            .clone()
            .unwrap_or_else(|| context.report_directory(DEFAULT_REPORT_DIRECTORY));
        let directory = std::path::absolute(&directory)?;
        if ensure_dir(&directory)? {
            info!("Created directory '{}'.", directory.display());
        }

        self.resolver = Some(SourceResolver::from_options(options)?);
        self.report_directory = Some(directory);
        self.phase = ReportPhase::Configured;
        Ok(())
    }

    /// Starts a run. Calling it again while collecting starts over.
    pub fn begin(&mut self) -> Result<(), ReportError> {
        self.expect_phase("begin", &[ReportPhase::Configured, ReportPhase::Collecting])?;
        self.rule_sources.clear();
        Arc::make_mut(&mut self.results).reset();
        self.phase = ReportPhase::Collecting;
        Ok(())
    }

    pub fn begin_group(&mut self, group: &Group) -> Result<(), ReportError> {
        self.add_rule_source("begin_group", &group.source)
    }

    pub fn begin_concept(&mut self, concept: &Concept) -> Result<(), ReportError> {
        self.add_rule_source("begin_concept", &concept.source)
    }

    pub fn begin_constraint(&mut self, constraint: &Constraint) -> Result<(), ReportError> {
        self.add_rule_source("begin_constraint", &constraint.source)
    }

    pub fn begin_rule(&mut self, rule: &Rule) -> Result<(), ReportError> {
        match rule {
            Rule::Group(g) => self.begin_group(g),
            Rule::Concept(c) => self.begin_concept(c),
            Rule::Constraint(c) => self.begin_constraint(c),
        }
    }

    pub fn set_result(&mut self, result: ExecutionResult) -> Result<(), ReportError> {
        self.expect_phase("set_result", &[ReportPhase::Collecting])?;
        let id = result.rule.id().to_string();
        let kind = result.rule.kind();
        let normalized = normalize(result, &self.labeler)?;
        Arc::make_mut(&mut self.results).put(normalized);
        debug!(rule = %id, %kind, "Result collected");
        Ok(())
    }

    /// Documents the current run would render, without rendering them.
    pub fn resolve(&self) -> Result<FileGroups, ReportError> {
        self.resolver()?.resolve(&self.rule_sources)
    }

    /// Resolves and renders every document. The first failing document aborts
    /// the whole run.
    #[instrument(skip_all)]
    pub fn end(&mut self) -> Result<RenderSummary, ReportError> {
        self.expect_phase("end", &[ReportPhase::Collecting])?;
        self.phase = ReportPhase::Rendering;
        let outcome = self.render_all();
        self.phase = ReportPhase::Configured;
        outcome
    }

    fn render_all(&mut self) -> Result<RenderSummary, ReportError> {
        let groups = self.resolve()?;
        let mut summary = RenderSummary::default();
        if groups.is_empty() {
            info!("No narrative documents to render.");
            return Ok(summary);
        }

        let report_directory = self
            .report_directory
            .clone()
            .ok_or_else(|| ReportError::InternalError("report directory not set".into()))?;
        info!("Writing to report directory {}", report_directory.display());

        for (base_dir, files) in &groups {
            let mut options = RenderOptions::new(&report_directory, base_dir)
                .attribute("experimental", "true")
                .attribute("icons", "font")
                .attribute("source-highlighter", "coderay");
            options.backend = Backend::Html5;
            options.safe_mode = SafeMode::Unsafe;

            for file in files {
                info!("-> {}", file.display());
                self.renderer.register_extensions(Arc::clone(&self.results));
                let converted = self.renderer.convert_file(file, &options);
                self.renderer.unregister_all_extensions();

                let output = converted.map_err(|e| ReportError::Render {
                    file: file.clone(),
                    source: Box::new(e),
                })?;
                summary.documents.push(RenderedDocument {
                    source: file.clone(),
                    base_dir: base_dir.clone(),
                    output,
                });
            }
        }

        info!(
            "Rendered {} narrative document(s) successfully.",
            summary.documents.len()
        );
        Ok(summary)
    }

    fn add_rule_source(
        &mut self,
        operation: &'static str,
        source: &RuleSource,
    ) -> Result<(), ReportError> {
        self.expect_phase(operation, &[ReportPhase::Collecting])?;
        self.rule_sources.insert(source.clone());
        Ok(())
    }

    fn resolver(&self) -> Result<&SourceResolver, ReportError> {
        self.resolver
            .as_ref()
            .ok_or_else(|| self.lifecycle_error("resolve"))
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        allowed: &[ReportPhase],
    ) -> Result<(), ReportError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(self.lifecycle_error(operation))
        }
    }

    fn lifecycle_error(&self, operation: &'static str) -> ReportError {
        ReportError::Domain(DomainError::Lifecycle {
            operation,
            phase: self.phase.to_string(),
        })
    }
}
