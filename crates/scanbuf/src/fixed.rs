use alloc::vec::Vec;

use bstr::ByteSlice;

use crate::{
    ByteSource, Cursors, MarkerNotFound, ReadError,
    window::{self, CursorSet},
};

/// Refills a fixed-capacity buffer in place.
///
/// Unread bytes are shifted to the front before each refill, so the buffer
/// is never reallocated. If the consumer makes no progress and the buffer is
/// full, [`read`](Self::read) fails with [`ReadError::BufferFull`].
///
/// `B` is any byte storage: `Vec<u8>`, `Box<[u8]>`, `[u8; N]` or a borrowed
/// `&mut [u8]`. Its full length is the capacity.
///
/// ```rust
/// use scanbuf::{Cursors, FixedReader, ReadError};
///
/// let mut cur = Cursors::new();
/// let mut r = FixedReader::new(&b"Hello,\nWorld!\n"[..], [0u8; 10]);
///
/// r.read(&mut cur).unwrap();
/// assert_eq!(r.window(&cur), b"Hello,\nWor");
/// cur.p = cur.pe;
/// r.read(&mut cur).unwrap();
/// assert_eq!(r.window(&cur), b"ld!\n");
/// assert!(cur.at_eof());
/// cur.p = cur.pe;
/// assert_eq!(r.read(&mut cur), Err(ReadError::EndOfInput));
/// ```
#[derive(Debug)]
pub struct FixedReader<S, B = Vec<u8>> {
    source: S,
    buf: B,
    /// End of buffered bytes; `[pe, filled)` is held back by a backup.
    filled: usize,
    exhausted: bool,
    /// Bytes shifted out of the buffer so far.
    offset: u64,
}

impl<S, B> FixedReader<S, B>
where
    S: ByteSource,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Creates a reader that fills `buf` from `source`.
    pub fn new(source: S, buf: B) -> Self {
        Self {
            source,
            buf,
            filled: 0,
            exhausted: false,
            offset: 0,
        }
    }

    /// Shifts unread bytes to the front and reads more after them.
    ///
    /// Returns the number of bytes the window grew by. Bytes held back by an
    /// earlier [`backup_to`](Self::backup_to) are delivered again before the
    /// source is consulted. When the source runs dry with at least one byte
    /// delivered, the call succeeds and `cur.eof == Some(cur.pe)`.
    ///
    /// # Errors
    ///
    /// - [`ReadError::EndOfInput`] once nothing is left to deliver.
    /// - [`ReadError::BufferFull`] if `cur.p == 0` and the window already
    ///   spans the whole buffer. Nothing is mutated, so the call may be
    ///   repeated.
    /// - [`ReadError::Source`] if the source fails.
    pub fn read(&mut self, cur: &mut Cursors) -> Result<usize, ReadError<S::Error>> {
        self.refill(cur)
    }

    /// Retreats `cur.pe` to just past the last `marker` in `[p, pe)`.
    ///
    /// The bytes after the marker stay buffered and open the next window.
    ///
    /// # Errors
    ///
    /// [`MarkerNotFound`] if `[p, pe)` holds no `marker`; the cursors are
    /// unchanged.
    pub fn backup_to(&mut self, cur: &mut Cursors, marker: u8) -> Result<(), MarkerNotFound> {
        self.back_up(cur, marker)
    }

    pub(crate) fn refill<C: CursorSet>(&mut self, cur: &mut C) -> Result<usize, ReadError<S::Error>> {
        let capacity = self.capacity();
        debug_assert!(cur.is_valid_for(capacity), "cursors out of bounds");
        debug_assert!(cur.end() <= self.filled, "window past buffered data");

        if !self.exhausted && window::is_stalled(cur.anchor(), cur.end(), capacity) {
            tracing::debug!(capacity, "buffer full without progress");
            return Err(ReadError::BufferFull { capacity });
        }

        let data = self.buf.as_mut();
        let by = window::preserve_tail(data, &mut self.filled, cur);
        self.offset += by as u64;
        let start = cur.end();

        if !self.exhausted && self.filled < capacity {
            let fill = self
                .source
                .fill(&mut data[self.filled..capacity])
                .map_err(ReadError::Source)?;
            tracing::trace!(count = fill.count, exhausted = fill.exhausted, "source fill");
            self.filled += fill.count;
            self.exhausted = fill.exhausted;
        }

        cur.set_end(self.filled, self.exhausted);
        let grown = self.filled - start;
        if grown == 0 && self.exhausted {
            return Err(ReadError::EndOfInput);
        }
        debug_assert!(cur.is_valid_for(capacity));
        Ok(grown)
    }

    pub(crate) fn back_up<C: CursorSet>(&mut self, cur: &mut C, marker: u8) -> Result<(), MarkerNotFound> {
        let pe = cur.end();
        let data = self.buf.as_ref();
        let Some(end) = window::backup_end(data, cur.floor(), pe, marker) else {
            return Err(MarkerNotFound { marker });
        };
        if end < pe {
            tracing::debug!(held_back = pe - end, tail = ?data[end..pe].as_bstr(), "window backed up");
        }
        cur.set_end(end, self.exhausted && end == self.filled);
        Ok(())
    }

    /// The whole buffer; index it with the cursors.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// The window `[p, pe)`.
    #[must_use]
    pub fn window(&self, cur: &Cursors) -> &[u8] {
        &self.data()[cur.p..cur.pe]
    }

    /// Fixed capacity of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Absolute stream position of buffer index 0.
    #[must_use]
    pub fn stream_offset(&self) -> u64 {
        self.offset
    }

    /// End of buffered data, bytes held back behind `pe` included.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.filled
    }

    /// Whether the source has reported end of input.
    ///
    /// Buffered bytes may still be waiting for delivery.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Borrows the source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the source and the buffer.
    pub fn into_inner(self) -> (S, B) {
        (self.source, self.buf)
    }
}
