// rulebook-core/src/infrastructure/config/options.rs

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::infrastructure::error::InfrastructureError;

pub const PROPERTY_REPORT_DIRECTORY: &str = "reportDirectory";
pub const PROPERTY_RULE_DIRECTORY: &str = "ruleDirectory";
pub const PROPERTY_FILE_INCLUDE: &str = "fileIncludePattern";
pub const PROPERTY_FILE_EXCLUDE: &str = "fileExcludePattern";

const CONFIG_CANDIDATES: [&str; 2] = ["rulebook.yaml", "rulebook.yml"];

/// Flat option set recognised by the narrative report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_directory: Option<PathBuf>,

    /// Presence switches source resolution to explicit-directory mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_directory: Option<PathBuf>,

    #[validate(length(min = 1, message = "Include pattern cannot be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_include_pattern: Option<String>,

    #[validate(length(min = 1, message = "Exclude pattern cannot be empty"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_exclude_pattern: Option<String>,
}

impl ReportOptions {
    /// Builds options from a flat key/value map, ignoring unknown keys.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let mut options = Self::default();
        options.merge_properties(properties);
        options
    }

    /// Overlays the keys present in `properties` on top of `self`.
    pub fn merge_properties(&mut self, properties: &HashMap<String, String>) {
        if let Some(v) = properties.get(PROPERTY_REPORT_DIRECTORY) {
            self.report_directory = Some(PathBuf::from(v));
        }
        if let Some(v) = properties.get(PROPERTY_RULE_DIRECTORY) {
            self.rule_directory = Some(PathBuf::from(v));
        }
        if let Some(v) = properties.get(PROPERTY_FILE_INCLUDE) {
            self.file_include_pattern = Some(v.clone());
        }
        if let Some(v) = properties.get(PROPERTY_FILE_EXCLUDE) {
            self.file_exclude_pattern = Some(v.clone());
        }
    }

    /// Lets the environment override what the files said.
    /// ex: RULEBOOK_RULE_DIRECTORY=docs/rules rulebook render ...
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("RULEBOOK_REPORT_DIRECTORY") {
            info!(old = ?self.report_directory, new = ?val, "Overriding report directory via ENV");
            self.report_directory = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("RULEBOOK_RULE_DIRECTORY") {
            info!(old = ?self.rule_directory, new = ?val, "Overriding rule directory via ENV");
            self.rule_directory = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("RULEBOOK_FILE_INCLUDE") {
            self.file_include_pattern = Some(val);
        }
        if let Some(val) = lookup("RULEBOOK_FILE_EXCLUDE") {
            self.file_exclude_pattern = Some(val);
        }
    }
}

/// Loads `rulebook.yaml` (or `.yml`) from `project_dir`, if there is one.
#[instrument(skip(project_dir))]
pub fn load_report_options(project_dir: &Path) -> Result<ReportOptions, InfrastructureError> {
    let Some(config_path) = CONFIG_CANDIDATES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.exists())
    else {
        return Ok(ReportOptions::default());
    };

    info!(path = ?config_path, "Loading report options");
    load_options_file(&config_path)
}

pub fn load_options_file(path: &Path) -> Result<ReportOptions, InfrastructureError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report options at {:?}", path))
        .map_err(|e| InfrastructureError::ConfigError(format!("{:#}", e)))?;
    let options: ReportOptions = serde_yaml::from_str(&content)?;
    Ok(options)
}

/// Supplied by the surrounding tool: where reports live unless told otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    report_root: PathBuf,
}

impl ReportContext {
    pub fn new(report_root: impl Into<PathBuf>) -> Self {
        Self {
            report_root: report_root.into(),
        }
    }

    pub fn report_root(&self) -> &Path {
        &self.report_root
    }

    pub fn report_directory(&self, name: &str) -> PathBuf {
        self.report_root.join(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_from_properties() {
        let props: HashMap<String, String> = [
            (PROPERTY_RULE_DIRECTORY, "docs/rules"),
            (PROPERTY_FILE_INCLUDE, "*.adoc"),
            ("somethingElse", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let options = ReportOptions::from_properties(&props);

        assert_eq!(options.rule_directory, Some(PathBuf::from("docs/rules")));
        assert_eq!(options.file_include_pattern.as_deref(), Some("*.adoc"));
        assert_eq!(options.report_directory, None);
        assert_eq!(options.file_exclude_pattern, None);
    }

    #[test]
    fn test_load_yaml_with_camel_case_keys() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("rulebook.yaml"),
            "reportDirectory: out/report\nfileExcludePattern: \"draft-*\"\n",
        )?;

        let options = load_report_options(dir.path())?;

        assert_eq!(options.report_directory, Some(PathBuf::from("out/report")));
        assert_eq!(options.file_exclude_pattern.as_deref(), Some("draft-*"));
        assert_eq!(options.rule_directory, None);
        Ok(())
    }

    #[test]
    fn test_missing_config_file_gives_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert_eq!(load_report_options(dir.path())?, ReportOptions::default());
        Ok(())
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut options = ReportOptions {
            rule_directory: Some(PathBuf::from("from-file")),
            ..Default::default()
        };

        options.apply_overrides_from(|key| match key {
            "RULEBOOK_RULE_DIRECTORY" => Some("from-env".to_string()),
            _ => None,
        });

        assert_eq!(options.rule_directory, Some(PathBuf::from("from-env")));
        assert_eq!(options.report_directory, None);
    }

    #[test]
    fn test_empty_pattern_fails_validation() {
        let options = ReportOptions {
            file_include_pattern: Some(String::new()),
            ..Default::default()
        };
        assert!(options.validate().is_err());
        assert!(ReportOptions::default().validate().is_ok());
    }

    #[test]
    fn test_report_context_directory() {
        let ctx = ReportContext::new("/tmp/report");
        assert_eq!(
            ctx.report_directory("narrative"),
            PathBuf::from("/tmp/report/narrative")
        );
    }
}
