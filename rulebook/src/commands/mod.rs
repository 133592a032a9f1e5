// rulebook/src/commands/mod.rs

pub mod render;
pub mod resolve;

use tracing::debug;

use rulebook_core::application::NarrativeReport;
use rulebook_core::infrastructure::JinjaDocumentRenderer;
use rulebook_core::infrastructure::config::{
    ReportContext, ReportOptions, load_options_file, load_report_options,
};

use crate::cli::ReportArgs;

/// Options file < command-line flags < RULEBOOK_* environment variables.
pub fn load_options(args: &ReportArgs) -> miette::Result<ReportOptions> {
    let mut options = match &args.config {
        Some(path) => load_options_file(path)?,
        None => load_report_options(&args.project_dir)?,
    };
    options.merge_properties(&args.properties());
    options.apply_env_overrides();
    debug!(?options, "Report options resolved");
    Ok(options)
}

pub fn configured_report(
    args: &ReportArgs,
) -> miette::Result<NarrativeReport<JinjaDocumentRenderer>> {
    let options = load_options(args)?;
    let context = ReportContext::new(args.report_root());

    let mut report = NarrativeReport::new(JinjaDocumentRenderer::new());
    report.configure(&context, &options)?;
    Ok(report)
}
