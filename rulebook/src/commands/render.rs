// rulebook/src/commands/render.rs
//
// USE CASE: Replay an execution log and render the narrative documents.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;

use rulebook_core::application::{ExecutionLog, RenderSummary, replay};
use rulebook_core::domain::{ResultStore, RuleResult};

use crate::cli::ReportArgs;
use crate::commands::configured_report;

pub fn execute(log: PathBuf, args: ReportArgs) -> miette::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the recorded run
    println!("⚙️  Loading execution log {}...", log.display());
    let log = ExecutionLog::load(&log)?;
    println!(
        "   {} rule(s), {} result(s)",
        log.rules.len(),
        log.results.len()
    );

    // B. Configure, collect and render
    let mut report = configured_report(&args)?;
    let summary = replay(&log, &mut report)?;

    // C. Output
    if !report.results().is_empty() {
        println!("{}", results_table(report.results()));
    }
    print_documents(&summary);

    println!("\n✨ Done in {:.2?}", start.elapsed());
    Ok(())
}

fn results_table(results: &ResultStore) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Kind", "Rule", "Status", "Severity", "Rows"]);

    let rows = results.concepts().into_iter().chain(results.constraints());
    for result in rows {
        table.add_row(result_row(result));
    }
    table
}

fn result_row(result: &RuleResult) -> Vec<String> {
    vec![
        result.rule().kind().to_string(),
        result.rule().id().to_string(),
        result.status().to_string(),
        result.effective_severity().to_string(),
        result.rows().len().to_string(),
    ]
}

fn print_documents(summary: &RenderSummary) {
    if summary.is_empty() {
        println!("📭 No narrative documents rendered.");
        return;
    }
    println!("📄 Rendered {} document(s):", summary.documents.len());
    for doc in &summary.documents {
        println!("   ➜ {} -> {}", doc.source.display(), doc.output.display());
    }
}
