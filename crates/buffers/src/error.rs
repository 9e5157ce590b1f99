//! Buffer error type.

use thiserror::Error;

/// Error type for linked buffer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("patch of {actual} bytes does not fit a reservation of {expected} bytes")]
    PatchSizeMismatch { expected: usize, actual: usize },
    #[error("reservation does not belong to the current contents of this buffer")]
    StaleReservation,
    #[error("start offset {start} is outside a buffer of {capacity} bytes")]
    StartOutOfBounds { start: usize, capacity: usize },
}
