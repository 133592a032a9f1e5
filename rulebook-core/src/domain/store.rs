// rulebook-core/src/domain/store.rs

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::result::RuleResult;
use crate::domain::rule::{ExecutableRule, RuleKind, Status};

/// Results of one report run, split by rule kind. Last write wins.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    concepts: HashMap<String, RuleResult>,
    constraints: HashMap<String, RuleResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub success: usize,
    pub warning: usize,
    pub failure: usize,
    pub skipped: usize,
}

impl StatusCounts {
    fn record(&mut self, status: Status) {
        match status {
            Status::Success => self.success += 1,
            Status::Warning => self.warning += 1,
            Status::Failure => self.failure += 1,
            Status::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub concepts: StatusCounts,
    pub constraints: StatusCounts,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.concepts.clear();
        self.constraints.clear();
    }

    pub fn put(&mut self, result: RuleResult) {
        let id = result.rule().id().to_string();
        match result.rule() {
            ExecutableRule::Concept(_) => self.concepts.insert(id, result),
            ExecutableRule::Constraint(_) => self.constraints.insert(id, result),
        };
    }

    pub fn concept(&self, id: &str) -> Option<&RuleResult> {
        self.concepts.get(id)
    }

    pub fn constraint(&self, id: &str) -> Option<&RuleResult> {
        self.constraints.get(id)
    }

    /// Groups have no namespace and always come back empty.
    pub fn get(&self, kind: RuleKind, id: &str) -> Option<&RuleResult> {
        match kind {
            RuleKind::Concept => self.concept(id),
            RuleKind::Constraint => self.constraint(id),
            RuleKind::Group => None,
        }
    }

    /// Concept results ordered by rule id.
    pub fn concepts(&self) -> Vec<&RuleResult> {
        sorted(&self.concepts)
    }

    /// Constraint results ordered by rule id.
    pub fn constraints(&self) -> Vec<&RuleResult> {
        sorted(&self.constraints)
    }

    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();
        for r in self.concepts.values() {
            summary.concepts.record(r.status());
        }
        for r in self.constraints.values() {
            summary.constraints.record(r.status());
        }
        summary
    }

    pub fn len(&self) -> usize {
        self.concepts.len() + self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty() && self.constraints.is_empty()
    }
}

fn sorted(map: &HashMap<String, RuleResult>) -> Vec<&RuleResult> {
    let mut entries: Vec<(&String, &RuleResult)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::result::{ExecutionResult, normalize};
    use crate::domain::rule::{Concept, Constraint, RuleSource, Severity};
    use crate::ports::labeler::{LabelError, Labeler};
    use serde_json::Value;

    struct Plain;

    impl Labeler for Plain {
        fn label(&self, value: &Value) -> Result<String, LabelError> {
            Ok(value.to_string())
        }
    }

    fn result(rule: ExecutableRule, status: Status) -> RuleResult {
        let raw = ExecutionResult {
            rule,
            severity: Severity::Major,
            status,
            column_names: vec![],
            rows: vec![],
        };
        normalize(raw, &Plain).unwrap()
    }

    fn concept(id: &str) -> ExecutableRule {
        ExecutableRule::Concept(Concept {
            id: id.into(),
            description: None,
            severity: Severity::Major,
            source: RuleSource::new("file:///r/index.adoc"),
        })
    }

    fn constraint(id: &str) -> ExecutableRule {
        ExecutableRule::Constraint(Constraint {
            id: id.into(),
            description: None,
            severity: Severity::Major,
            source: RuleSource::new("file:///r/index.adoc"),
        })
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = ResultStore::new();
        store.put(result(concept("c"), Status::Failure));
        store.put(result(concept("c"), Status::Success));

        assert_eq!(store.len(), 1);
        assert_eq!(store.concept("c").unwrap().status(), Status::Success);
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let mut store = ResultStore::new();
        store.put(result(concept("shared"), Status::Success));
        store.put(result(constraint("shared"), Status::Failure));

        assert_eq!(store.concept("shared").unwrap().status(), Status::Success);
        assert_eq!(store.constraint("shared").unwrap().status(), Status::Failure);
        assert_eq!(store.len(), 2);
        assert!(store.get(RuleKind::Group, "shared").is_none());
    }

    #[test]
    fn test_reset_clears_both_namespaces() {
        let mut store = ResultStore::new();
        store.put(result(concept("a"), Status::Success));
        store.put(result(constraint("b"), Status::Success));

        store.reset();
        store.reset();

        assert!(store.is_empty());
        assert!(store.concept("a").is_none());
        assert!(store.constraint("b").is_none());
    }

    #[test]
    fn test_listing_is_sorted_and_summary_counts() {
        let mut store = ResultStore::new();
        store.put(result(constraint("z"), Status::Failure));
        store.put(result(constraint("a"), Status::Warning));
        store.put(result(concept("m"), Status::Skipped));

        let ids: Vec<&str> = store.constraints().iter().map(|r| r.rule().id()).collect();
        assert_eq!(ids, ["a", "z"]);

        let summary = store.summary();
        assert_eq!(summary.constraints.failure, 1);
        assert_eq!(summary.constraints.warning, 1);
        assert_eq!(summary.concepts.skipped, 1);
        assert_eq!(summary.concepts.success, 0);
    }
}
