// rulebook-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod fs;
pub mod labeler;
pub mod pattern;
pub mod renderer;
pub mod source_resolver;

pub use labeler::DefaultLabeler;
pub use renderer::JinjaDocumentRenderer;
pub use source_resolver::{DEFAULT_INDEX_FILE, FileGroups, SourceResolver};
