// rulebook-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(rulebook::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML / JSON ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(rulebook::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(code(rulebook::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(rulebook::infra::config))]
    ConfigError(String),

    #[error("Invalid report options: {0}")]
    #[diagnostic(code(rulebook::infra::options))]
    InvalidOptions(#[from] validator::ValidationErrors),

    #[error("Invalid file pattern '{pattern}': {source}")]
    #[diagnostic(
        code(rulebook::infra::pattern),
        help("Patterns are comma separated globs, e.g. '*.adoc,*.md'.")
    )]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    // --- SOURCE RESOLUTION ---
    #[error("Cannot resolve rule source '{source_location}': {reason}")]
    #[diagnostic(code(rulebook::infra::resolution))]
    Resolution {
        source_location: String,
        reason: String,
    },

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(rulebook::infra::template),
        help("Check your Jinja syntax ({{ ... }}) inside the document.")
    )]
    TemplateError(#[from] minijinja::Error),
}
