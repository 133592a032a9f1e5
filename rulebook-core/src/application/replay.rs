// rulebook-core/src/application/replay.rs

// Feeds a recorded rule-engine run into a report, so narratives can be
// rebuilt without re-analyzing anything.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::application::report::{NarrativeReport, RenderSummary};
use crate::domain::result::ExecutionResult;
use crate::domain::rule::Rule;
use crate::error::ReportError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::labeler::Labeler;
use crate::ports::renderer::DocumentRenderer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLog {
    /// Rules in the order the engine began them.
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub results: Vec<ExecutionResult>,
}

impl ExecutionLog {
    /// `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, InfrastructureError> {
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let log = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(log)
    }
}

/// Collects a recorded run into `report` (begin, rules, results) without
/// rendering. The report is left collecting.
pub fn collect<R, L>(
    log: &ExecutionLog,
    report: &mut NarrativeReport<R, L>,
) -> Result<(), ReportError>
where
    R: DocumentRenderer,
    L: Labeler,
{
    report.begin()?;
    for rule in &log.rules {
        report.begin_rule(rule)?;
    }
    for result in &log.results {
        report.set_result(result.clone())?;
    }
    info!(
        rules = log.rules.len(),
        results = log.results.len(),
        "Execution log collected"
    );
    Ok(())
}

#[instrument(skip_all)]
pub fn replay<R, L>(
    log: &ExecutionLog,
    report: &mut NarrativeReport<R, L>,
) -> Result<RenderSummary, ReportError>
where
    R: DocumentRenderer,
    L: Labeler,
{
    collect(log, report)?;
    report.end()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rule::{RuleKind, Status};
    use crate::infrastructure::config::{ReportContext, ReportOptions};
    use crate::infrastructure::renderer::JinjaDocumentRenderer;
    use anyhow::Result;

    const LOG_YAML: &str = r#"
rules:
  - kind: group
    id: default
    source: "file:///nowhere/rules.xml"
  - kind: concept
    id: java:Types
    severity: minor
    source: "file:///nowhere/index.adoc"
results:
  - rule:
      kind: concept
      id: java:Types
      severity: minor
      source: "file:///nowhere/index.adoc"
    severity: minor
    status: success
    column_names: [Type]
    rows:
      - Type: com.acme.Foo
"#;

    #[test]
    fn test_load_by_extension() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let yaml = dir.path().join("run.yaml");
        std::fs::write(&yaml, LOG_YAML)?;

        let log = ExecutionLog::load(&yaml)?;
        assert_eq!(log.rules.len(), 2);
        assert_eq!(log.rules[0].kind(), RuleKind::Group);
        assert_eq!(log.results[0].status, Status::Success);

        let json = dir.path().join("run.json");
        std::fs::write(&json, serde_json::to_string(&log)?)?;
        assert_eq!(ExecutionLog::load(&json)?, log);
        Ok(())
    }

    #[test]
    fn test_load_rejects_garbage() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.json");
        std::fs::write(&path, "{ not json")?;

        assert!(matches!(
            ExecutionLog::load(&path),
            Err(InfrastructureError::JsonError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_replay_renders_index_documents() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let rules = dir.path().join("rules");
        std::fs::create_dir_all(&rules)?;
        let index = rules.join("index.adoc");
        std::fs::write(
            &index,
            "{% set c = concept('java:Types') %}{{ c.status }}: {{ c.rows[0].Type[0] }}",
        )?;

        let source = crate::domain::rule::RuleSource::from_path(&index)?;
        let yaml = LOG_YAML.replace("file:///nowhere/index.adoc", source.location());
        let log: ExecutionLog = serde_yaml::from_str(&yaml)?;

        let mut report = NarrativeReport::new(JinjaDocumentRenderer::new());
        report.configure(
            &ReportContext::new(dir.path().join("report")),
            &ReportOptions::default(),
        )?;
        let summary = replay(&log, &mut report)?;

        assert_eq!(summary.documents.len(), 1);
        let html = std::fs::read_to_string(&summary.documents[0].output)?;
        assert_eq!(html, "success: com.acme.Foo");
        Ok(())
    }

    #[test]
    fn test_collect_requires_configuration() {
        let mut report = NarrativeReport::new(JinjaDocumentRenderer::new());
        assert!(collect(&ExecutionLog::default(), &mut report).is_err());
    }
}
