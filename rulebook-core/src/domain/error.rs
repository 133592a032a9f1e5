// rulebook-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Cannot get location of rule source '{location}': {reason}")]
    #[diagnostic(
        code(rulebook::domain::location),
        help("Rule sources must be valid URLs, e.g. 'file:///rules/index.adoc'.")
    )]
    InvalidLocation { location: String, reason: String },

    #[error("Cannot label value of column '{column}' in result of '{rule_id}': {reason}")]
    #[diagnostic(code(rulebook::domain::label))]
    Label {
        rule_id: String,
        column: String,
        reason: String,
    },

    #[error("'{operation}' is not allowed while the report is {phase}")]
    #[diagnostic(
        code(rulebook::domain::lifecycle),
        help("Expected order: configure -> begin -> rule callbacks -> end.")
    )]
    Lifecycle {
        operation: &'static str,
        phase: String,
    },
}
