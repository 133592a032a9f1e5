// rulebook-core/src/domain/result.rs

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::error::DomainError;
use crate::domain::rule::{ExecutableRule, Severity, Status};
use crate::ports::labeler::Labeler;

/// Raw outcome of one concept or constraint, as handed over by the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub rule: ExecutableRule,
    pub severity: Severity,
    pub status: Status,
    #[serde(default)]
    pub column_names: Vec<String>,
    /// Cells are arbitrary values; a JSON array is a multi-valued cell.
    #[serde(default)]
    pub rows: Vec<HashMap<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCell {
    pub column: String,
    pub labels: Vec<String>,
}

/// One normalized row: exactly one cell per declared column, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultRow {
    cells: Vec<ResultCell>,
}

impl ResultRow {
    pub fn cells(&self) -> &[ResultCell] {
        &self.cells
    }

    pub fn get(&self, column: &str) -> Option<&[String]> {
        self.cells
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.labels.as_slice())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// Rows are exposed to templates as `row[column]`, so serialize as a map.
impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for cell in &self.cells {
            map.serialize_entry(&cell.column, &cell.labels)?;
        }
        map.end()
    }
}

/// Renderable projection of an [`ExecutionResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    rule: ExecutableRule,
    effective_severity: Severity,
    status: Status,
    column_names: Vec<String>,
    rows: Vec<ResultRow>,
}

impl RuleResult {
    pub fn rule(&self) -> &ExecutableRule {
        &self.rule
    }

    pub fn effective_severity(&self) -> Severity {
        self.effective_severity
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }
}

/// Normalizes a raw result. Any labeling failure fails the whole result.
pub fn normalize(
    result: ExecutionResult,
    labeler: &dyn Labeler,
) -> Result<RuleResult, DomainError> {
    let ExecutionResult {
        rule,
        severity,
        status,
        column_names,
        rows,
    } = result;

    let mut normalized_rows = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut cells = Vec::with_capacity(column_names.len());
        for column in &column_names {
            let labels = match row.get(column) {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(|v| labeler.label(v))
                    .collect::<Result<Vec<_>, _>>(),
                Some(value) => labeler.label(value).map(|l| vec![l]),
                // Absent cells are labeled like an explicit null.
                None => labeler.label(&Value::Null).map(|l| vec![l]),
            }
            .map_err(|e| DomainError::Label {
                rule_id: rule.id().to_string(),
                column: column.clone(),
                reason: e.0,
            })?;

            cells.push(ResultCell {
                column: column.clone(),
                labels,
            });
        }
        normalized_rows.push(ResultRow { cells });
    }

    Ok(RuleResult {
        rule,
        effective_severity: severity,
        status,
        column_names,
        rows: normalized_rows,
    })
}
