pub mod text_loader;

pub use text_loader::{load_source_text, SourceKind};
