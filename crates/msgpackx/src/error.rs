//! Encoder error types.

use std::io;

use msgpackx_buffers::BufferError;
use thiserror::Error;

/// Why a single value cannot be represented in MessagePack.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    #[error("string of {0} bytes exceeds the str32 limit")]
    StrTooLong(usize),
    #[error("binary of {0} bytes exceeds the bin32 limit")]
    BinTooLong(usize),
    #[error("container of {0} entries exceeds the 32-bit count limit")]
    TooManyEntries(u64),
}

/// Error type for encoding a message into a [`LinkedBuffer`](msgpackx_buffers::LinkedBuffer).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("buffer previously used and had not been reset")]
    BufferReused,
    #[error("outer container was already opened")]
    AlreadyStarted,
    #[error("no open container to write into")]
    NoOpenContainer,
    #[error("container closed without a matching open")]
    UnbalancedClose,
    #[error("output is unfinished: {open} container(s) still open")]
    Unfinished { open: usize },
    #[error("cannot encode field {field}: {reason}")]
    Unsupported {
        field: String,
        #[source]
        reason: ValueError,
    },
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Error type for encoding a message straight into an [`io::Write`] sink.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("writing to the sink failed: {0}")]
    Io(#[from] io::Error),
}
