// rulebook-core/src/infrastructure/pattern.rs

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::infrastructure::error::InfrastructureError;

/// Include/exclude filter on file names. A missing include accepts
/// everything, a missing exclude rejects nothing.
#[derive(Debug, Clone, Default)]
pub struct FilePatternMatcher {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

#[derive(Debug, Default)]
pub struct FilePatternMatcherBuilder {
    include: Option<String>,
    exclude: Option<String>,
}

impl FilePatternMatcher {
    pub fn builder() -> FilePatternMatcherBuilder {
        FilePatternMatcherBuilder::default()
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        let included = self
            .include
            .as_ref()
            .is_none_or(|set| set.is_match(file_name));
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|set| set.is_match(file_name));
        included && !excluded
    }
}

impl FilePatternMatcherBuilder {
    pub fn include(mut self, patterns: Option<&str>) -> Self {
        self.include = patterns.map(str::to_string);
        self
    }

    pub fn exclude(mut self, patterns: Option<&str>) -> Self {
        self.exclude = patterns.map(str::to_string);
        self
    }

    pub fn build(self) -> Result<FilePatternMatcher, InfrastructureError> {
        Ok(FilePatternMatcher {
            include: compile(self.include.as_deref())?,
            exclude: compile(self.exclude.as_deref())?,
        })
    }
}

fn compile(patterns: Option<&str>) -> Result<Option<GlobSet>, InfrastructureError> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let glob = Glob::new(pattern).map_err(|source| InfrastructureError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|source| InfrastructureError::InvalidPattern {
            pattern: patterns.to_string(),
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_patterns_accepts_everything() -> anyhow::Result<()> {
        let matcher = FilePatternMatcher::builder().build()?;
        assert!(matcher.accepts("a.adoc"));
        assert!(matcher.accepts("README"));
        Ok(())
    }

    #[test]
    fn test_include_and_exclude() -> anyhow::Result<()> {
        let matcher = FilePatternMatcher::builder()
            .include(Some("*.adoc"))
            .exclude(Some("draft-*"))
            .build()?;

        assert!(matcher.accepts("index.adoc"));
        assert!(!matcher.accepts("b.txt"));
        assert!(!matcher.accepts("draft-notes.adoc"));
        Ok(())
    }

    #[test]
    fn test_comma_separated_lists() -> anyhow::Result<()> {
        let matcher = FilePatternMatcher::builder()
            .include(Some("*.adoc, *.md"))
            .build()?;

        assert!(matcher.accepts("a.adoc"));
        assert!(matcher.accepts("b.md"));
        assert!(!matcher.accepts("c.txt"));
        Ok(())
    }

    #[test]
    fn test_invalid_glob_is_reported() {
        let result = FilePatternMatcher::builder().include(Some("a[")).build();
        match result {
            Err(InfrastructureError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "a["),
            other => panic!("Expected invalid pattern, got {:?}", other),
        }
    }
}
