//! Error types for the catalog core.
//!
//! Library code returns [`CatalogError`]; the binary and the storage
//! collaborators use `anyhow`, which is wrapped into the `Storage` variant
//! at the trait seam. Selection errors are user-facing validation failures
//! and carry messages suitable for direct display.

use thiserror::Error;

use crate::models::ComponentKind;
use crate::selection::SelectionKey;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The caller passed a kind string outside the closed set.
    #[error("unknown component kind: '{0}'")]
    UnknownKind(String),

    /// No component with this id exists within its kind.
    #[error("{kind} with id {id} not found")]
    NotFound { kind: ComponentKind, id: i64 },

    /// Storage returned a record missing a required common field. This is a
    /// data-integrity fault in the collaborator, not a normal input.
    #[error("malformed {kind} record {id}: missing required field '{field}'")]
    MalformedRecord {
        kind: ComponentKind,
        id: i64,
        field: &'static str,
    },

    /// The comparison selection already holds the maximum of 3 entries.
    #[error("comparison selection is full (3 components max)")]
    CapacityExceeded,

    /// Only components of one kind can be compared side by side.
    #[error("cannot mix component kinds: selection holds {expected}, got {found}")]
    KindMismatch {
        expected: ComponentKind,
        found: ComponentKind,
    },

    /// The component is already in the comparison selection.
    #[error("{key} is already selected for comparison")]
    AlreadyPresent { key: SelectionKey },

    /// A comparison needs at least two selected components.
    #[error("comparison needs at least 2 components, selection holds {0}")]
    InsufficientSelection(usize),

    /// A storage collaborator fault outside the search degrade path.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
