use alloc::collections::TryReserveError;

use thiserror::Error;

/// Why a `read` produced no new window.
///
/// `E` is the error type of the underlying [`ByteSource`](crate::ByteSource).
#[derive(Error, Debug, PartialEq)]
pub enum ReadError<E> {
    /// The source is exhausted and every byte it produced has been delivered.
    #[error("end of input")]
    EndOfInput,
    /// The source ran out before the boundary byte of the current record.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The consumer made no progress and the fixed buffer has no room left.
    #[error("buffer full: no progress within {capacity} bytes")]
    BufferFull {
        /// Capacity of the fixed buffer.
        capacity: usize,
    },
    /// A growing buffer would have to exceed its configured ceiling.
    #[error("buffer capacity limit of {limit} bytes exceeded")]
    CapacityExceeded {
        /// The configured maximum capacity.
        limit: usize,
    },
    /// The allocator refused to grow the buffer.
    #[error("buffer allocation failed")]
    Alloc(#[from] TryReserveError),
    /// The source itself failed; its error is passed through untouched.
    #[error("source error")]
    Source(#[source] E),
}

impl<E> ReadError<E> {
    /// Whether this is the clean end of the stream.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ReadError::EndOfInput)
    }

    /// Whether the reader can never produce another window.
    ///
    /// Buffer-full is the only recoverable condition: advancing `p` (or
    /// dropping the pending token) frees room.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReadError::BufferFull { .. })
    }
}

/// `backup_to` found no marker byte in the searchable part of the window.
///
/// The cursors are left as they were.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("marker byte {marker:#04x} not found in window")]
pub struct MarkerNotFound {
    /// The byte that was searched for.
    pub marker: u8,
}
