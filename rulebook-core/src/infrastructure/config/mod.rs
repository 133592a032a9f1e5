pub mod options;

pub use options::{ReportContext, ReportOptions, load_options_file, load_report_options};
