// rulebook/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use rulebook_core::infrastructure::config::options::{
    PROPERTY_FILE_EXCLUDE, PROPERTY_FILE_INCLUDE, PROPERTY_REPORT_DIRECTORY,
    PROPERTY_RULE_DIRECTORY,
};

#[derive(Parser)]
#[command(name = "rulebook")]
#[command(about = "Renders narrative rule documents from rule-engine results", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📖 Replays an execution log and renders the narrative documents
    Render {
        /// Execution log (JSON, or YAML with a .yaml/.yml extension)
        #[arg(long)]
        log: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// 🔎 Shows which documents would be rendered, without rendering them
    Resolve {
        /// Execution log providing the rule sources (auto-discovery only)
        #[arg(long)]
        log: Option<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Project directory
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Options file (default: <project-dir>/rulebook.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where rendered documents are written
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Render every matching file of this directory instead of index documents
    #[arg(long)]
    pub rule_dir: Option<PathBuf>,

    /// Comma separated globs of files to render (with --rule-dir)
    #[arg(long)]
    pub include: Option<String>,

    /// Comma separated globs of files to skip (with --rule-dir)
    #[arg(long)]
    pub exclude: Option<String>,
}

impl ReportArgs {
    /// Flags as report properties, keyed like the options file.
    pub fn properties(&self) -> HashMap<String, String> {
        let mut properties = HashMap::new();
        let entries = [
            (PROPERTY_REPORT_DIRECTORY, self.report_dir.as_ref().map(|p| p.display().to_string())),
            (PROPERTY_RULE_DIRECTORY, self.rule_dir.as_ref().map(|p| p.display().to_string())),
            (PROPERTY_FILE_INCLUDE, self.include.clone()),
            (PROPERTY_FILE_EXCLUDE, self.exclude.clone()),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                properties.insert(key.to_string(), value);
            }
        }
        properties
    }

    pub fn report_root(&self) -> PathBuf {
        self.project_dir.join("target").join("rulebook").join("report")
    }
}
