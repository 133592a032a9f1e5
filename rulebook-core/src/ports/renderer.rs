// rulebook-core/src/ports/renderer.rs

// The rendering engine is a host for extensions: the orchestrator installs
// the result-aware extensions, converts one document, then tears them down
// before the next document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::store::ResultStore;
use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Html5,
    Text,
}

impl Backend {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html5 => "html",
            Self::Text => "txt",
        }
    }
}

/// How much a document may reach outside itself while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeMode {
    #[default]
    Unsafe,
    Safe,
    Secure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub to_dir: PathBuf,
    pub base_dir: PathBuf,
    pub backend: Backend,
    pub safe_mode: SafeMode,
    pub mkdirs: bool,
    pub attributes: BTreeMap<String, String>,
}

impl RenderOptions {
    pub fn new(to_dir: &Path, base_dir: &Path) -> Self {
        Self {
            to_dir: to_dir.to_path_buf(),
            base_dir: base_dir.to_path_buf(),
            backend: Backend::default(),
            safe_mode: SafeMode::default(),
            mkdirs: true,
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }
}

pub trait DocumentRenderer {
    fn register_extensions(&mut self, results: Arc<ResultStore>);

    /// Renders one document and returns the path of the written artifact.
    fn convert_file(&mut self, file: &Path, options: &RenderOptions)
    -> Result<PathBuf, ReportError>;

    fn unregister_all_extensions(&mut self);
}
