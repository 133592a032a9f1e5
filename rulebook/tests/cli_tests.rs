use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Throwaway project with narrative documents and a recorded run.
struct RulebookTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl RulebookTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().join("project");
        fs::create_dir_all(&root)?;
        Ok(Self { _tmp: tmp, root })
    }

    fn write(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// One constraint, failing, declared in `source`.
    fn write_log(&self, source: &Path) -> Result<PathBuf> {
        let location = format!("file://{}", source.display());
        let rule = json!({
            "kind": "constraint",
            "id": "layer:Dependency",
            "severity": "major",
            "source": location,
        });
        let log = json!({
            "rules": [rule],
            "results": [{
                "rule": rule,
                "severity": "critical",
                "status": "failure",
                "column_names": ["Type"],
                "rows": [{ "Type": "com.acme.Foo" }],
            }],
        });
        self.write("run.json", &serde_json::to_string_pretty(&log)?)
    }

    fn rulebook(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rulebook"));
        cmd.current_dir(&self.root);
        for var in [
            "RULEBOOK_REPORT_DIRECTORY",
            "RULEBOOK_RULE_DIRECTORY",
            "RULEBOOK_FILE_INCLUDE",
            "RULEBOOK_FILE_EXCLUDE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}

const INDEX: &str = "<h1>Layers</h1>\n\
{% set k = constraint('layer:Dependency') %}\
<p class=\"{{ k.status | status_class }}\">{{ k.status }} ({{ k.effective_severity }})</p>\n\
{{ result_table('constraint', 'layer:Dependency') }}";

#[test]
fn test_render_auto_discovers_index_document() -> Result<()> {
    let env = RulebookTestEnv::new()?;
    let index = env.write("rules/index.adoc", INDEX)?;
    env.write_log(&index)?;

    env.rulebook()
        .args(["render", "--log", "run.json", "--project-dir"])
        .arg(&env.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("layer:Dependency"))
        .stdout(predicate::str::contains("Rendered 1 document(s)"));

    let output = env.root.join("target/rulebook/report/narrative/index.html");
    let html = fs::read_to_string(output)?;
    assert!(html.contains("<p class=\"rb-status-failure\">failure (critical)</p>"));
    assert!(html.contains("<td>com.acme.Foo</td>"));
    Ok(())
}

#[test]
fn test_render_explicit_rule_directory() -> Result<()> {
    let env = RulebookTestEnv::new()?;
    let index = env.write("rules/index.adoc", INDEX)?;
    env.write_log(&index)?;
    env.write("docs/overview.adoc", "<p>{{ summary().constraints.failure }} failing</p>")?;
    env.write("docs/draft.adoc", "{% broken")?;
    env.write("docs/notes.txt", "ignored")?;
    let out = env.root.join("out");

    env.rulebook()
        .args(["render", "--log", "run.json", "--include", "*.adoc", "--exclude", "draft*"])
        .arg("--rule-dir")
        .arg(env.root.join("docs"))
        .arg("--report-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 1 document(s)"));

    assert_eq!(fs::read_to_string(out.join("overview.html"))?, "<p>1 failing</p>");
    assert!(!out.join("index.html").exists());
    assert!(!out.join("draft.html").exists());
    Ok(())
}

#[test]
fn test_render_reads_options_file() -> Result<()> {
    let env = RulebookTestEnv::new()?;
    let index = env.write("rules/index.adoc", INDEX)?;
    env.write_log(&index)?;
    env.write("rulebook.yaml", "reportDirectory: site/narrative\n")?;

    env.rulebook()
        .args(["render", "--log", "run.json"])
        .assert()
        .success();

    assert!(env.root.join("site/narrative/index.html").exists());
    Ok(())
}

#[test]
fn test_render_failure_exits_with_diagnostic() -> Result<()> {
    let env = RulebookTestEnv::new()?;
    let index = env.write("rules/index.adoc", "{% if %}")?;
    env.write_log(&index)?;

    env.rulebook()
        .args(["render", "--log", "run.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot convert file"));
    Ok(())
}

#[test]
fn test_render_missing_log_fails() -> Result<()> {
    let env = RulebookTestEnv::new()?;

    env.rulebook()
        .args(["render", "--log", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File System Error"));
    Ok(())
}

#[test]
fn test_resolve_lists_documents_without_rendering() -> Result<()> {
    let env = RulebookTestEnv::new()?;
    let index = env.write("rules/index.adoc", INDEX)?;
    env.write_log(&index)?;

    env.rulebook()
        .args(["resolve", "--log", "run.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.adoc"));

    assert!(!env.root.join("target/rulebook/report").exists());
    Ok(())
}

#[test]
fn test_resolve_without_sources_reports_nothing() -> Result<()> {
    let env = RulebookTestEnv::new()?;

    env.rulebook()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("No narrative documents to render"));
    Ok(())
}
