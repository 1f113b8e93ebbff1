//! Token-cursor layer over the readers.
//!
//! A scanner drives the same refill and backup routines as its reader, but
//! over [`ScanCursors`]: shifts are anchored at `min(p, ts)` so a pending
//! token's bytes survive, and `ts`/`te` move with `p`/`pe`. Backups never
//! retreat below `ts` or `te`.

use alloc::vec::Vec;

use crate::{
    ByteSource, FixedReader, GrowOptions, GrowingReader, MarkerNotFound, ReadError, ScanCursors,
};

/// Returns the token bytes of `cur` within `data`.
fn token_of<'a>(data: &'a [u8], cur: &ScanCursors) -> Option<&'a [u8]> {
    let ts = cur.ts?;
    let te = cur.te.unwrap_or(cur.pe);
    data.get(ts..te)
}

/// A [`FixedReader`] that keeps a pending token alive across refills.
///
/// If the pending token alone fills the buffer, [`read`](Self::read) fails
/// with [`ReadError::BufferFull`].
///
/// ```rust
/// use scanbuf::{FixedScanner, ScanCursors};
///
/// let mut cur = ScanCursors::new();
/// let mut s = FixedScanner::new(&br#"say "hello world" twice"#[..], vec![0u8; 12]);
///
/// s.read(&mut cur).unwrap();
/// assert_eq!(s.window(&cur), br#"say "hello w"#);
/// // The consumer saw a quote at 4 and is still inside the string.
/// cur.start_token(4);
/// cur.p = cur.pe;
/// s.read(&mut cur).unwrap();
/// assert_eq!(cur.ts, Some(0));
/// assert_eq!(s.token(&cur), Some(&br#""hello world"#[..]));
/// ```
#[derive(Debug)]
pub struct FixedScanner<S, B = Vec<u8>> {
    reader: FixedReader<S, B>,
}

impl<S, B> FixedScanner<S, B>
where
    S: ByteSource,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Creates a scanner that fills `buf` from `source`.
    pub fn new(source: S, buf: B) -> Self {
        Self {
            reader: FixedReader::new(source, buf),
        }
    }

    /// Shifts everything from `min(p, ts)` to the front and reads more.
    ///
    /// See [`FixedReader::read`]; `ts` and `te` are translated with `p`.
    ///
    /// # Errors
    ///
    /// As [`FixedReader::read`]. [`ReadError::BufferFull`] here means the
    /// unread window plus the pending token fill the whole buffer.
    pub fn read(&mut self, cur: &mut ScanCursors) -> Result<usize, ReadError<S::Error>> {
        self.reader.refill(cur)
    }

    /// Retreats `cur.pe` to just past the last `marker` at or above
    /// `max(p, ts, te)`.
    ///
    /// # Errors
    ///
    /// [`MarkerNotFound`] if there is no such marker; the cursors are
    /// unchanged.
    pub fn backup_to(&mut self, cur: &mut ScanCursors, marker: u8) -> Result<(), MarkerNotFound> {
        self.reader.back_up(cur, marker)
    }

    /// The whole buffer; index it with the cursors.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.reader.data()
    }

    /// The window `[p, pe)`.
    #[must_use]
    pub fn window(&self, cur: &ScanCursors) -> &[u8] {
        &self.data()[cur.p..cur.pe]
    }

    /// The pending token: `[ts, te)`, or `[ts, pe)` while `te` is unset.
    #[must_use]
    pub fn token(&self, cur: &ScanCursors) -> Option<&[u8]> {
        token_of(self.data(), cur)
    }

    /// The wrapped reader.
    #[must_use]
    pub fn reader(&self) -> &FixedReader<S, B> {
        &self.reader
    }

    /// Returns the source and the buffer.
    pub fn into_inner(self) -> (S, B) {
        self.reader.into_inner()
    }
}

/// A [`GrowingReader`] that keeps a pending token alive across records.
///
/// ```rust
/// use scanbuf::{GrowingScanner, ScanCursors};
///
/// let mut cur = ScanCursors::new();
/// let mut s = GrowingScanner::new(&b"key = 'a.b'. next."[..], b'.');
///
/// s.read(&mut cur).unwrap();
/// assert_eq!(s.window(&cur), b"key = 'a.");
/// cur.start_token(6);
/// cur.p = cur.pe;
/// s.read(&mut cur).unwrap();
/// assert_eq!(s.token(&cur), Some(&b"'a.b'."[..]));
/// ```
#[derive(Debug)]
pub struct GrowingScanner<S> {
    reader: GrowingReader<S>,
}

impl<S: ByteSource> GrowingScanner<S> {
    /// Creates a scanner splitting `source` into records ending in `boundary`.
    pub fn new(source: S, boundary: u8) -> Self {
        Self {
            reader: GrowingReader::new(source, boundary),
        }
    }

    /// Like [`new`](Self::new), with explicit capacity settings.
    pub fn with_options(source: S, boundary: u8, options: GrowOptions) -> Self {
        Self {
            reader: GrowingReader::with_options(source, boundary, options),
        }
    }

    /// Drops bytes below `min(p, ts)` and extends the window through the
    /// next boundary.
    ///
    /// # Errors
    ///
    /// As [`GrowingReader::read`].
    pub fn read(&mut self, cur: &mut ScanCursors) -> Result<usize, ReadError<S::Error>> {
        self.reader.refill(cur)
    }

    /// Retreats `cur.pe` to just past the last `marker` at or above
    /// `max(p, ts, te)`.
    ///
    /// # Errors
    ///
    /// [`MarkerNotFound`] if there is no such marker; the cursors are
    /// unchanged.
    pub fn backup_to(&mut self, cur: &mut ScanCursors, marker: u8) -> Result<(), MarkerNotFound> {
        self.reader.back_up(cur, marker)
    }

    /// The buffered window, `[0, pe)`.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.reader.data()
    }

    /// The window `[p, pe)`.
    #[must_use]
    pub fn window(&self, cur: &ScanCursors) -> &[u8] {
        &self.data()[cur.p..cur.pe]
    }

    /// The pending token: `[ts, te)`, or `[ts, pe)` while `te` is unset.
    #[must_use]
    pub fn token(&self, cur: &ScanCursors) -> Option<&[u8]> {
        token_of(self.data(), cur)
    }

    /// The wrapped reader.
    #[must_use]
    pub fn reader(&self) -> &GrowingReader<S> {
        &self.reader
    }

    /// Returns the source and the window buffer.
    pub fn into_inner(self) -> (S, Vec<u8>) {
        self.reader.into_inner()
    }
}
