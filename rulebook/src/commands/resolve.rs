// rulebook/src/commands/resolve.rs
//
// USE CASE: Dry run. Lists the documents a render would produce.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::collections::HashSet;
use std::path::PathBuf;

use rulebook_core::application::ExecutionLog;
use rulebook_core::domain::RuleSource;
use rulebook_core::infrastructure::SourceResolver;

use crate::cli::ReportArgs;
use crate::commands::load_options;

pub fn execute(log: Option<PathBuf>, args: ReportArgs) -> miette::Result<()> {
    let log = match log {
        Some(path) => ExecutionLog::load(&path)?,
        None => ExecutionLog::default(),
    };

    // No report is configured, so nothing is created on disk.
    let options = load_options(&args)?;
    let resolver = SourceResolver::from_options(&options)?;
    let sources: HashSet<&RuleSource> = log.rules.iter().map(|rule| rule.source()).collect();
    let groups = resolver.resolve(sources)?;

    if groups.is_empty() {
        println!("📭 No narrative documents to render.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Base directory", "Document"]);
    for (base_dir, files) in &groups {
        for file in files {
            table.add_row(vec![
                base_dir.display().to_string(),
                file.display().to_string(),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}
