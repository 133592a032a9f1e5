// rulebook-core/src/ports/mod.rs

pub mod labeler;
pub mod renderer;

pub use labeler::{LabelError, Labeler};
pub use renderer::{Backend, DocumentRenderer, RenderOptions, SafeMode};
