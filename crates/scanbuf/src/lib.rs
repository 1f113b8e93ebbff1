//! Windowed refill buffers for table-driven incremental scanners.
//!
//! Generated scanners (Ragel and friends) do not pull bytes one at a time.
//! They are handed a window `[p, pe)` of a buffer, advance `p` through it,
//! and ask for more when they run dry. This crate owns the buffer side of
//! that loop: refilling without losing the unread tail, backing the window
//! up to a delimiter, and telling "no room and no progress" apart from end
//! of input.
//!
//! The cursors live in a plain record owned by the consumer and lent to
//! every call:
//!
//! ```rust
//! use scanbuf::{Cursors, FixedReader, ReadError};
//!
//! let mut cur = Cursors::new();
//! let mut reader = FixedReader::new(&b"Hello,\nWorld!\n"[..], vec![0u8; 10]);
//!
//! let mut lines = Vec::new();
//! loop {
//!     match reader.read(&mut cur) {
//!         Ok(_) => {}
//!         Err(ReadError::EndOfInput) => break,
//!         Err(e) => panic!("{e}"),
//!     }
//!     // Only hand complete lines to the scanner.
//!     if reader.backup_to(&mut cur, b'\n').is_err() {
//!         break;
//!     }
//!     lines.push(reader.window(&cur).to_vec());
//!     cur.p = cur.pe; // `%% write exec;` would advance p here
//! }
//! assert_eq!(lines, [b"Hello,\n".to_vec(), b"World!\n".to_vec()]);
//! ```
//!
//! # Components
//!
//! - [`FixedReader`] refills a caller-supplied buffer in place.
//! - [`GrowingReader`] grows its buffer until the window ends in a boundary
//!   byte, i.e. it reads whole records of unknown size.
//! - [`FixedScanner`] and [`GrowingScanner`] add the `ts`/`te` token cursors
//!   of [`ScanCursors`] and keep a pending token alive across refills.
//! - [`ByteSource`] is the input seam; `&[u8]` and [`IoSource`] implement it.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod cursor;
mod error;
mod fixed;
mod growing;
mod options;
mod scanner;
mod source;
mod window;

#[cfg(test)]
mod tests;

pub use cursor::{Cursors, ScanCursors};
pub use error::{MarkerNotFound, ReadError};
pub use fixed::FixedReader;
pub use growing::GrowingReader;
pub use options::{CHUNK_SIZE, DEFAULT_MAX_CAPACITY, GrowOptions};
pub use scanner::{FixedScanner, GrowingScanner};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::{ByteSource, Fill};
