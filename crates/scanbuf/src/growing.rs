use alloc::vec::Vec;

use bstr::ByteSlice;

use crate::{
    ByteSource, Cursors, GrowOptions, MarkerNotFound, ReadError,
    window::{self, CursorSet},
};

/// Reads whole boundary-terminated records into a growing buffer.
///
/// Each [`read`](Self::read) extends the window until it ends with the
/// boundary byte, growing the buffer as needed. Bytes the source delivers
/// past the boundary are held back for the next read. The buffer always
/// ends at `pe`: `data().len() == cur.pe`.
///
/// ```rust
/// use scanbuf::{Cursors, GrowingReader, ReadError};
///
/// let mut cur = Cursors::new();
/// let mut r = GrowingReader::new(&b"Hello,\nWorld!"[..], b'\n');
///
/// r.read(&mut cur).unwrap();
/// assert_eq!(r.window(&cur), b"Hello,\n");
/// // No trailing newline: the record is truncated.
/// assert_eq!(r.read(&mut cur), Err(ReadError::UnexpectedEndOfInput));
/// assert_eq!(r.window(&cur), b"Hello,\nWorld!");
/// ```
#[derive(Debug)]
pub struct GrowingReader<S> {
    source: S,
    boundary: u8,
    options: GrowOptions,
    /// Window bytes `[0, pe)`.
    buf: Vec<u8>,
    /// Bytes read past the last boundary or held back by a backup.
    pending: Vec<u8>,
    exhausted: bool,
    offset: u64,
}

impl<S: ByteSource> GrowingReader<S> {
    /// Creates a reader splitting `source` into records ending in `boundary`.
    pub fn new(source: S, boundary: u8) -> Self {
        Self::with_options(source, boundary, GrowOptions::default())
    }

    /// Like [`new`](Self::new), with explicit capacity settings.
    pub fn with_options(source: S, boundary: u8, options: GrowOptions) -> Self {
        let options = options.normalized();
        Self {
            source,
            boundary,
            options,
            buf: Vec::with_capacity(options.initial_capacity),
            pending: Vec::new(),
            exhausted: false,
            offset: 0,
        }
    }

    /// Drops consumed bytes and extends the window through the next boundary.
    ///
    /// Returns the number of bytes the window grew by.
    ///
    /// # Errors
    ///
    /// - [`ReadError::EndOfInput`] once nothing is left to deliver.
    /// - [`ReadError::UnexpectedEndOfInput`] if the source ends inside a
    ///   record. The partial record is still added to the window and
    ///   `cur.eof` is set.
    /// - [`ReadError::CapacityExceeded`] if the record outgrows
    ///   [`GrowOptions::max_capacity`].
    /// - [`ReadError::Alloc`] if the allocator refuses to grow the buffer.
    /// - [`ReadError::Source`] if the source fails.
    ///
    /// Except for [`ReadError::UnexpectedEndOfInput`], a failed read leaves
    /// the window as it was after the consumed prefix was dropped.
    pub fn read(&mut self, cur: &mut Cursors) -> Result<usize, ReadError<S::Error>> {
        self.refill(cur)
    }

    /// Retreats `cur.pe` to just past the last `marker` in `[p, pe)`.
    ///
    /// The bytes after the marker are held back and open the next window.
    ///
    /// # Errors
    ///
    /// [`MarkerNotFound`] if `[p, pe)` holds no `marker`; the cursors are
    /// unchanged.
    pub fn backup_to(&mut self, cur: &mut Cursors, marker: u8) -> Result<(), MarkerNotFound> {
        self.back_up(cur, marker)
    }

    pub(crate) fn refill<C: CursorSet>(&mut self, cur: &mut C) -> Result<usize, ReadError<S::Error>> {
        debug_assert_eq!(cur.end(), self.buf.len(), "window must end at the buffer end");
        debug_assert!(cur.is_valid_for(self.buf.len()), "cursors out of bounds");

        let by = cur.anchor();
        if by > 0 {
            tracing::trace!(by, len = self.buf.len(), "dropping consumed prefix");
            self.buf.drain(..by);
            cur.translate(by);
            self.offset += by as u64;
        }
        let start = self.buf.len();

        let found = self.take_pending()
            || match self.fill_record(start) {
                Ok(found) => found,
                Err(e) => {
                    // Leave the window as it was; the new bytes wait in `pending`.
                    self.hold_back(start);
                    return Err(e);
                }
            };

        let pe = self.buf.len();
        let at_eof = self.exhausted && self.pending.is_empty();
        cur.set_end(pe, at_eof);
        debug_assert!(cur.is_valid_for(pe));

        match (found, pe - start) {
            (true, grown) => Ok(grown),
            (false, 0) => Err(ReadError::EndOfInput),
            (false, _) => Err(ReadError::UnexpectedEndOfInput),
        }
    }

    /// Moves held-back bytes into the window, up to and including the first
    /// boundary. Returns whether a boundary was moved.
    fn take_pending(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        match window::record_end(&self.pending, 0, self.boundary) {
            Some(end) => {
                self.buf.extend(self.pending.drain(..end));
                true
            }
            None => {
                self.buf.append(&mut self.pending);
                false
            }
        }
    }

    /// Moves `buf[at..]` to the front of the held-back bytes.
    fn hold_back(&mut self, at: usize) {
        if at < self.buf.len() {
            let mut held = self.buf.split_off(at);
            held.append(&mut self.pending);
            self.pending = held;
        }
    }

    /// Reads until a boundary arrives or the source is exhausted.
    fn fill_record(&mut self, start: usize) -> Result<bool, ReadError<S::Error>> {
        let mut scan_from = start;
        while !self.exhausted {
            let len = self.buf.len();
            let limit = self.options.max_capacity;
            if len >= limit {
                tracing::debug!(limit, "record exceeds capacity limit");
                return Err(ReadError::CapacityExceeded { limit });
            }
            let want = self.options.read_size.min(limit - len);
            if self.buf.capacity() - len < want {
                self.buf.try_reserve(want)?;
                tracing::debug!(capacity = self.buf.capacity(), "buffer grown");
            }

            self.buf.resize(len + want, 0);
            let fill = match self.source.fill(&mut self.buf[len..]) {
                Ok(fill) => fill,
                Err(e) => {
                    self.buf.truncate(len);
                    return Err(ReadError::Source(e));
                }
            };
            self.buf.truncate(len + fill.count);
            self.exhausted = fill.exhausted;
            tracing::trace!(count = fill.count, exhausted = fill.exhausted, "source fill");

            if let Some(end) = window::record_end(&self.buf, scan_from, self.boundary) {
                self.pending.extend_from_slice(&self.buf[end..]);
                self.buf.truncate(end);
                return Ok(true);
            }
            scan_from = self.buf.len();
        }
        Ok(false)
    }

    pub(crate) fn back_up<C: CursorSet>(&mut self, cur: &mut C, marker: u8) -> Result<(), MarkerNotFound> {
        let pe = cur.end();
        let Some(end) = window::backup_end(&self.buf, cur.floor(), pe, marker) else {
            return Err(MarkerNotFound { marker });
        };
        if end < pe {
            tracing::debug!(held_back = pe - end, tail = ?self.buf[end..pe].as_bstr(), "window backed up");
            self.hold_back(end);
        }
        cur.set_end(end, self.exhausted && self.pending.is_empty());
        Ok(())
    }

    /// The buffered window, `[0, pe)`; index it with the cursors.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// The window `[p, pe)`.
    #[must_use]
    pub fn window(&self, cur: &Cursors) -> &[u8] {
        &self.buf[cur.p..cur.pe]
    }

    /// The record boundary byte.
    #[must_use]
    pub fn boundary(&self) -> u8 {
        self.boundary
    }

    /// Effective capacity settings.
    #[must_use]
    pub fn options(&self) -> GrowOptions {
        self.options
    }

    /// Current allocated capacity of the window buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Absolute stream position of buffer index 0.
    #[must_use]
    pub fn stream_offset(&self) -> u64 {
        self.offset
    }

    /// Window bytes plus held-back bytes.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len() + self.pending.len()
    }

    /// Whether the source has reported end of input.
    ///
    /// Held-back bytes may still be waiting for delivery.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Borrows the source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the source and the window buffer.
    pub fn into_inner(self) -> (S, Vec<u8>) {
        (self.source, self.buf)
    }
}
