// rulebook-core/src/infrastructure/source_resolver.rs

// Decides which narrative documents a run renders, grouped by the directory
// they are rendered from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;
use validator::Validate;
use walkdir::WalkDir;

use crate::domain::rule::RuleSource;
use crate::error::ReportError;
use crate::infrastructure::config::ReportOptions;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::pattern::FilePatternMatcher;

/// File name marking a rule directory as a report root in auto-discovery mode.
pub const DEFAULT_INDEX_FILE: &str = "index.adoc";

/// Base directory -> documents to render from it.
///
/// Groups iterate in path order. Files inside an auto-discovered group keep
/// the order in which rule sources were visited, which is NOT stable across
/// runs; sort them yourself if you need a fixed order.
pub type FileGroups = BTreeMap<PathBuf, Vec<PathBuf>>;

#[derive(Debug, Clone)]
enum ResolutionMode {
    Explicit {
        directory: PathBuf,
        matcher: FilePatternMatcher,
    },
    AutoDiscovery,
}

#[derive(Debug, Clone)]
pub struct SourceResolver {
    mode: ResolutionMode,
}

impl SourceResolver {
    pub fn explicit(
        directory: impl Into<PathBuf>,
        include: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<Self, InfrastructureError> {
        let matcher = FilePatternMatcher::builder()
            .include(include)
            .exclude(exclude)
            .build()?;
        Ok(Self {
            mode: ResolutionMode::Explicit {
                directory: directory.into(),
                matcher,
            },
        })
    }

    pub fn auto_discovery() -> Self {
        Self {
            mode: ResolutionMode::AutoDiscovery,
        }
    }

    pub fn from_options(options: &ReportOptions) -> Result<Self, InfrastructureError> {
        options.validate()?;
        match &options.rule_directory {
            Some(dir) => Self::explicit(
                dir,
                options.file_include_pattern.as_deref(),
                options.file_exclude_pattern.as_deref(),
            ),
            None => Ok(Self::auto_discovery()),
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self.mode, ResolutionMode::Explicit { .. })
    }

    pub fn resolve<'a, I>(&self, rule_sources: I) -> Result<FileGroups, ReportError>
    where
        I: IntoIterator<Item = &'a RuleSource>,
    {
        match &self.mode {
            ResolutionMode::Explicit { directory, matcher } => {
                resolve_explicit(directory, matcher).map_err(ReportError::from)
            }
            ResolutionMode::AutoDiscovery => resolve_index_documents(rule_sources),
        }
    }
}

fn resolve_explicit(
    directory: &Path,
    matcher: &FilePatternMatcher,
) -> Result<FileGroups, InfrastructureError> {
    let mut groups = FileGroups::new();
    if !directory.exists() {
        warn!(
            "Specified rule directory does not exist: '{}'.",
            directory.display()
        );
        return Ok(groups);
    }

    let mut files = Vec::new();
    // Symlinked documents count as the files they point to.
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Dangling links are not documents.
            Err(e) if e.io_error().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) => {
                debug!(error = %e, "Skipping dangling link");
                continue;
            }
            Err(e) => return Err(InfrastructureError::Io(e.into())),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if matcher.accepts(&name) {
            files.push(entry.into_path());
        } else {
            debug!(file = %name, "Skipping document not matched by patterns");
        }
    }

    if !files.is_empty() {
        groups.insert(directory.to_path_buf(), files);
    }
    Ok(groups)
}

fn resolve_index_documents<'a, I>(rule_sources: I) -> Result<FileGroups, ReportError>
where
    I: IntoIterator<Item = &'a RuleSource>,
{
    let mut groups = FileGroups::new();
    let suffix = format!("/{}", DEFAULT_INDEX_FILE);

    for rule_source in rule_sources {
        let url = rule_source.url()?;
        // Only file:// on this host can point at something renderable.
        if url.scheme() != "file" || !is_local_host(&url) || !url.path().ends_with(&suffix) {
            continue;
        }

        let file = decode_file_url(&url).map_err(|reason| InfrastructureError::Resolution {
            source_location: rule_source.location().to_string(),
            reason,
        })?;
        info!("Found index document '{}'.", file.display());

        let Some(directory) = file.parent().map(Path::to_path_buf) else {
            continue;
        };
        groups.entry(directory).or_default().push(file);
    }

    Ok(groups)
}

fn is_local_host(url: &Url) -> bool {
    matches!(url.host_str(), None | Some("") | Some("localhost"))
}

/// Strict percent-decoding: a '%' must be followed by two hex digits.
/// `Url::to_file_path` keeps malformed escapes as literal text, so they are
/// rejected here first.
fn decode_file_url(url: &Url) -> Result<PathBuf, String> {
    let bytes = url.path().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(format!("malformed escape sequence at offset {}", i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let path = url
        .to_file_path()
        .map_err(|_| "URL does not denote a local file path".to_string())?;
    if path.to_str().is_none() {
        return Err("decoded path is not valid UTF-8".to_string());
    }
    Ok(path)
}
