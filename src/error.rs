//! Error types surfaced by the library.

use crate::domain::{EditKind, Side};
use thiserror::Error;

/// An undo request that does not fit the snapshot it was applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("{side} line index {index} is out of range (document has {len} lines)")]
    LineOutOfRange { side: Side, index: usize, len: usize },

    #[error("insertion point {index} is out of range (must be at most {len})")]
    InsertionOutOfRange { index: usize, len: usize },

    #[error("{kind:?} edit requires a left-hand line index")]
    MissingLeftIndex { kind: EditKind },
}

/// A textual edit identifier that could not be parsed.
#[derive(Debug, Error)]
pub enum EditParseError {
    #[error("unknown edit kind '{0}' (expected change, add or delete)")]
    UnknownKind(String),

    #[error("edit '{input}' needs {expected} index(es)")]
    WrongArity { input: String, expected: usize },

    #[error("invalid line index '{0}'")]
    BadIndex(String, #[source] std::num::ParseIntError),

    #[error("invalid edit JSON")]
    Json(#[from] serde_json::Error),
}
