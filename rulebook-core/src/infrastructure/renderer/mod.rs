// rulebook-core/src/infrastructure/renderer/mod.rs

pub mod jinja;

pub use jinja::JinjaDocumentRenderer;
