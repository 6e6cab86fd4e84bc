use crate::entity::EntityKind;

/// Errors from entity store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Attempted to save a row whose id has no bytes.
    #[error("cannot store {kind} row with an empty id")]
    EmptyId { kind: EntityKind },

    /// A backend handed back a row of a different kind than requested.
    #[error("kind mismatch for {id}: expected {expected}, got {actual}")]
    KindMismatch {
        id: String,
        expected: EntityKind,
        actual: EntityKind,
    },

    /// Serialization or deserialization failure in a backend.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
