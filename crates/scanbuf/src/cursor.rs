use core::cmp;

use crate::window::CursorSet;

/// Window cursors shared between a reader and its consumer.
///
/// The consumer owns this record and lends it to every
/// [`read`](crate::FixedReader::read) and
/// [`backup_to`](crate::FixedReader::backup_to). It writes `p`; the reader
/// writes `pe` and `eof` and relocates all three when the buffer shifts.
///
/// # Invariants
///
/// After any successful call, `p <= pe <= len(buffer)`, and `eof` is either
/// `None` or `Some(pe)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursors {
    /// Index of the next byte the consumer will examine.
    pub p: usize,
    /// One past the last byte of the window.
    pub pe: usize,
    /// `Some(pe)` once the window holds the last bytes of the source.
    pub eof: Option<usize>,
}

impl Cursors {
    /// Cursors for a fresh, empty window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            p: 0,
            pe: 0,
            eof: None,
        }
    }

    /// Whether this is the final window of the stream.
    #[must_use]
    pub fn at_eof(&self) -> bool {
        self.eof == Some(self.pe)
    }

    /// Checks the cursor invariants against a buffer of length `len`.
    #[must_use]
    pub fn is_valid_for(&self, len: usize) -> bool {
        self.p <= self.pe && self.pe <= len && self.eof.is_none_or(|eof| eof == self.pe)
    }
}

impl CursorSet for Cursors {
    #[inline]
    fn anchor(&self) -> usize {
        self.p
    }

    #[inline]
    fn floor(&self) -> usize {
        self.p
    }

    #[inline]
    fn end(&self) -> usize {
        self.pe
    }

    #[inline]
    fn set_end(&mut self, pe: usize, eof: bool) {
        self.pe = pe;
        self.eof = eof.then_some(pe);
    }

    fn translate(&mut self, by: usize) {
        debug_assert!(by <= self.p, "shift past p");
        self.p -= by;
        self.pe -= by;
        self.eof = self.eof.map(|eof| eof - by);
    }

    fn is_valid_for(&self, len: usize) -> bool {
        Cursors::is_valid_for(self, len)
    }
}

/// Window cursors plus the token cursors of a scanner.
///
/// `ts` marks the start of a token still being built and keeps its bytes
/// alive across refills; `te` marks its provisional end. The consumer sets
/// both; the scanner only translates them when the buffer shifts.
///
/// # Invariants
///
/// After any successful call, `p <= pe <= len(buffer)` and, when set,
/// `ts <= p` and `te <= pe`. A token starts at or before the byte the
/// consumer is examining, so `ts` never runs ahead of `p`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanCursors {
    /// Index of the next byte the consumer will examine.
    pub p: usize,
    /// One past the last byte of the window.
    pub pe: usize,
    /// Start of the pending token, if any.
    pub ts: Option<usize>,
    /// Provisional end of the pending token, if any.
    pub te: Option<usize>,
    /// `Some(pe)` once the window holds the last bytes of the source.
    pub eof: Option<usize>,
}

impl ScanCursors {
    /// Cursors for a fresh, empty window with no pending token.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            p: 0,
            pe: 0,
            ts: None,
            te: None,
            eof: None,
        }
    }

    /// Whether this is the final window of the stream.
    #[must_use]
    pub fn at_eof(&self) -> bool {
        self.eof == Some(self.pe)
    }

    /// Marks a token as starting at `ts`.
    pub fn start_token(&mut self, ts: usize) {
        self.ts = Some(ts);
        self.te = None;
    }

    /// Forgets the pending token so its bytes may be shifted out.
    pub fn clear_token(&mut self) {
        self.ts = None;
        self.te = None;
    }

    /// The window cursors alone.
    #[must_use]
    pub fn window(&self) -> Cursors {
        Cursors {
            p: self.p,
            pe: self.pe,
            eof: self.eof,
        }
    }

    /// Checks the cursor invariants against a buffer of length `len`.
    #[must_use]
    pub fn is_valid_for(&self, len: usize) -> bool {
        self.window().is_valid_for(len)
            && self.ts.is_none_or(|ts| ts <= self.p)
            && self.te.is_none_or(|te| te <= self.pe)
    }
}

impl CursorSet for ScanCursors {
    #[inline]
    fn anchor(&self) -> usize {
        self.ts.map_or(self.p, |ts| cmp::min(ts, self.p))
    }

    #[inline]
    fn floor(&self) -> usize {
        let confirmed = cmp::max(self.ts.unwrap_or(0), self.te.unwrap_or(0));
        cmp::max(self.p, confirmed)
    }

    #[inline]
    fn end(&self) -> usize {
        self.pe
    }

    #[inline]
    fn set_end(&mut self, pe: usize, eof: bool) {
        self.pe = pe;
        self.eof = eof.then_some(pe);
    }

    fn translate(&mut self, by: usize) {
        debug_assert!(by <= self.anchor(), "shift past the anchor");
        self.p -= by;
        self.pe -= by;
        self.ts = self.ts.map(|ts| ts - by);
        // A stale `te` below the anchor is clamped rather than wrapped.
        self.te = self.te.map(|te| te.saturating_sub(by));
        self.eof = self.eof.map(|eof| eof - by);
    }

    fn is_valid_for(&self, len: usize) -> bool {
        ScanCursors::is_valid_for(self, len)
    }
}

impl From<ScanCursors> for Cursors {
    fn from(cur: ScanCursors) -> Self {
        cur.window()
    }
}
