pub mod loader;

pub use loader::{DocumentSource, FetchConfig, LoadError, load_document};
