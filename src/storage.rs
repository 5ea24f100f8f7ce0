mod loader;

pub use loader::{load_document, Format, LoadError};
