use thiserror::Error;

use crate::snapshot::element::ElementId;

/// Document text that cannot be turned into a snapshot at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("document contains a NUL byte at offset {offset}; not text markup")]
    Binary { offset: usize },

    #[error("document contains no markup")]
    NoMarkup,

    #[error("document is {len} bytes, over the {limit} byte limit")]
    TooLarge { len: usize, limit: usize },
}

/// A serialized element list that cannot be reconstructed into a snapshot.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("duplicate element id {0}")]
    DuplicateId(ElementId),

    #[error("element {id} has an empty tag")]
    EmptyTag { id: ElementId },

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}
