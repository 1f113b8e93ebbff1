//! Shift and backup arithmetic shared by every reader and scanner.
//!
//! Everything here is a function of cursor values and a byte slice; buffer
//! acquisition (fixed storage or a growing `Vec`) is the caller's business.
//!
//! Refill protocol
//! - The *anchor* is the lowest position that must survive a refill: `p` for
//!   readers, `min(p, ts)` for scanners holding a token.
//! - Bytes from the anchor to the end of buffered data move to offset 0 in
//!   place, and every cursor moves left by the anchor.
//! - New bytes are then appended after the buffered data.
//!
//! Backup protocol
//! - The window end retreats to just past the last marker in
//!   `[floor, pe)`; bytes behind it stay buffered for the next refill.

use bstr::ByteSlice;

/// The cursor record a refill or backup operates on.
///
/// Implemented by [`Cursors`](crate::Cursors) and
/// [`ScanCursors`](crate::ScanCursors); the readers' routines are generic
/// over it so the scanners reuse them unchanged.
pub(crate) trait CursorSet {
    /// Lowest position a shift must preserve.
    fn anchor(&self) -> usize;
    /// Lowest position a backup may retreat the window end to.
    fn floor(&self) -> usize;
    /// Current window end (`pe`).
    fn end(&self) -> usize;
    /// Moves the window end, marking it final when `eof` is set.
    fn set_end(&mut self, pe: usize, eof: bool);
    /// Moves every cursor left by `by`.
    fn translate(&mut self, by: usize);
    /// Checks the cursor invariants against a buffer of length `len`.
    fn is_valid_for(&self, len: usize) -> bool;
}

/// Moves `data[anchor..filled]` to the front of `data` and returns the new
/// amount of buffered data.
///
/// The copy overlaps freely (memmove semantics).
#[inline]
pub(crate) fn shift(data: &mut [u8], anchor: usize, filled: usize) -> usize {
    debug_assert!(anchor <= filled && filled <= data.len());
    if anchor == 0 {
        return filled;
    }
    data.copy_within(anchor..filled, 0);
    filled - anchor
}

/// Applies [`shift`] and relocates the cursors to match.
///
/// Returns the shift amount.
pub(crate) fn preserve_tail<C: CursorSet>(data: &mut [u8], filled: &mut usize, cur: &mut C) -> usize {
    let by = cur.anchor();
    if by > 0 {
        tracing::trace!(by, filled = *filled, "shifting unread tail");
        *filled = shift(data, by, *filled);
        cur.translate(by);
    }
    by
}

/// Whether a fixed buffer of `capacity` bytes can admit nothing more: the
/// consumer made no progress (`anchor == 0`) and the window already spans
/// the whole buffer.
///
/// Held-back bytes past `pe` do not count; they can still be delivered.
#[inline]
pub(crate) fn is_stalled(anchor: usize, pe: usize, capacity: usize) -> bool {
    anchor == 0 && pe >= capacity
}

/// Finds the window end a backup to `marker` would produce.
///
/// Searches strictly backward through `data[floor..pe]`, so the byte at `pe`
/// itself is never examined. Returns the index just past the match.
#[inline]
pub(crate) fn backup_end(data: &[u8], floor: usize, pe: usize, marker: u8) -> Option<usize> {
    if floor >= pe {
        return None;
    }
    data[floor..pe].rfind_byte(marker).map(|i| floor + i + 1)
}

/// Finds the end of the first record in `data[from..]` terminated by
/// `boundary`, as an index just past the boundary byte.
#[inline]
pub(crate) fn record_end(data: &[u8], from: usize, boundary: u8) -> Option<usize> {
    data.get(from..)?.find_byte(boundary).map(|i| from + i + 1)
}
