// rulebook-core/src/application/mod.rs

pub mod replay;
pub mod report;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI peut faire `use rulebook_core::application::{NarrativeReport, replay};`
// sans connaître la structure interne des fichiers.

pub use replay::{ExecutionLog, collect, replay};
pub use report::{
    DEFAULT_REPORT_DIRECTORY, NarrativeReport, RenderSummary, RenderedDocument, ReportPhase,
};
