// rulebook-core/src/domain/rule.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use url::Url;

use crate::domain::error::DomainError;

/// Where a rule definition came from. Equality is equality of location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSource {
    location: String,
}

impl RuleSource {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Builds a `file://` source from a filesystem path (made absolute first).
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let absolute = std::path::absolute(path).map_err(|e| DomainError::InvalidLocation {
            location: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let url = Url::from_file_path(&absolute).map_err(|_| DomainError::InvalidLocation {
            location: absolute.display().to_string(),
            reason: "path cannot be expressed as a file URL".to_string(),
        })?;
        Ok(Self::new(url.as_str()))
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn url(&self) -> Result<Url, DomainError> {
        Url::parse(&self.location).map_err(|e| DomainError::InvalidLocation {
            location: self.location.clone(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

// Ascending discriminants give Info < Minor < ... < Blocker for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Minor,
    #[default]
    Major,
    Critical,
    Blocker,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Critical => "critical",
            Self::Blocker => "blocker",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "critical" => Ok(Self::Critical),
            "blocker" => Ok(Self::Blocker),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Warning,
    Failure,
    Skipped,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Failure => "failure",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A container of other rules. Groups never produce a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: RuleSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    pub source: RuleSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    pub source: RuleSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Group,
    Concept,
    Constraint,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Group => "group",
            Self::Concept => "concept",
            Self::Constraint => "constraint",
        };
        f.write_str(s)
    }
}

/// Any rule the engine may announce when it starts executing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Group(Group),
    Concept(Concept),
    Constraint(Constraint),
}

impl Rule {
    pub fn id(&self) -> &str {
        match self {
            Self::Group(g) => &g.id,
            Self::Concept(c) => &c.id,
            Self::Constraint(c) => &c.id,
        }
    }

    pub fn source(&self) -> &RuleSource {
        match self {
            Self::Group(g) => &g.source,
            Self::Concept(c) => &c.source,
            Self::Constraint(c) => &c.source,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Group(_) => RuleKind::Group,
            Self::Concept(_) => RuleKind::Concept,
            Self::Constraint(_) => RuleKind::Constraint,
        }
    }
}

/// The subset of rules that yield an execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutableRule {
    Concept(Concept),
    Constraint(Constraint),
}

impl ExecutableRule {
    pub fn id(&self) -> &str {
        match self {
            Self::Concept(c) => &c.id,
            Self::Constraint(c) => &c.id,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Concept(c) => c.description.as_deref(),
            Self::Constraint(c) => c.description.as_deref(),
        }
    }

    pub fn source(&self) -> &RuleSource {
        match self {
            Self::Concept(c) => &c.source,
            Self::Constraint(c) => &c.source,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Concept(_) => RuleKind::Concept,
            Self::Constraint(_) => RuleKind::Constraint,
        }
    }
}

impl From<Concept> for ExecutableRule {
    fn from(concept: Concept) -> Self {
        Self::Concept(concept)
    }
}

impl From<Constraint> for ExecutableRule {
    fn from(constraint: Constraint) -> Self {
        Self::Constraint(constraint)
    }
}
