pub mod error;
pub mod result;
pub mod rule;
pub mod store;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use result::{ExecutionResult, ResultCell, ResultRow, RuleResult, normalize};
pub use rule::{
    Concept, Constraint, ExecutableRule, Group, Rule, RuleKind, RuleSource, Severity, Status,
};
pub use store::{ResultStore, ResultSummary, StatusCounts};
