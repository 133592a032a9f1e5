// rulebook-core/src/ports/labeler.rs

// Turns whatever the rule engine put into a result cell into the text a
// reader sees in a report.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct LabelError(pub String);

pub trait Labeler: Send + Sync {
    fn label(&self, value: &Value) -> Result<String, LabelError>;
}
