pub mod builder;
pub mod element;
pub mod error;
pub mod fingerprint;
pub mod snapshot_model;
pub mod text;
pub mod wire;

pub use builder::SnapshotOptions;
pub use element::{Element, ElementId, SelectorKind, Selectors};
pub use error::{ParseError, WireError};
pub use snapshot_model::Snapshot;
pub use wire::{ElementRecord, SnapshotRecord};
