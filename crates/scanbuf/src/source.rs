//! The input seam: a sequential byte source with an end-of-input signal.

use core::convert::Infallible;

/// Outcome of one [`ByteSource::fill`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fill {
    /// Number of bytes written to the front of the buffer.
    pub count: usize,
    /// Whether the source has nothing left after these bytes.
    pub exhausted: bool,
}

/// A sequential byte source.
///
/// `fill` reads up to `buf.len()` bytes into the front of `buf` and reports
/// how many it wrote and whether the source is now exhausted. It may block.
/// A source may return fewer bytes than requested without being exhausted;
/// once it reports `exhausted` it is never called again.
pub trait ByteSource {
    /// Error produced by the source. Passed through readers untouched.
    type Error;

    /// Reads into the front of `buf`.
    ///
    /// # Errors
    ///
    /// Returns the source's own error if reading fails.
    fn fill(&mut self, buf: &mut [u8]) -> Result<Fill, Self::Error>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    #[inline]
    fn fill(&mut self, buf: &mut [u8]) -> Result<Fill, Self::Error> {
        (**self).fill(buf)
    }
}

/// In-memory input. Exhaustion is reported together with the last bytes.
impl ByteSource for &[u8] {
    type Error = Infallible;

    fn fill(&mut self, buf: &mut [u8]) -> Result<Fill, Self::Error> {
        let count = buf.len().min(self.len());
        let (head, tail) = self.split_at(count);
        buf[..count].copy_from_slice(head);
        *self = tail;
        Ok(Fill {
            count,
            exhausted: self.is_empty(),
        })
    }
}

#[cfg(feature = "std")]
pub use io::IoSource;

#[cfg(feature = "std")]
mod io {
    use std::io::{self, Read};

    use super::{ByteSource, Fill};

    /// Adapts any [`Read`] into a [`ByteSource`].
    ///
    /// Each `fill` makes one successful `read` and passes a short read on as
    /// is, so a pipe or socket delivers whatever has arrived. A `read` of 0
    /// marks the source exhausted. `Interrupted` is retried; every other I/O
    /// error is returned as is.
    #[derive(Debug)]
    pub struct IoSource<R> {
        inner: R,
    }

    impl<R: Read> IoSource<R> {
        /// Wraps `inner`.
        pub fn new(inner: R) -> Self {
            Self { inner }
        }

        /// Returns the wrapped reader.
        pub fn into_inner(self) -> R {
            self.inner
        }

        /// Borrows the wrapped reader.
        pub fn get_ref(&self) -> &R {
            &self.inner
        }
    }

    impl<R: Read> ByteSource for IoSource<R> {
        type Error = io::Error;

        fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
            if buf.is_empty() {
                return Ok(Fill::default());
            }
            loop {
                match self.inner.read(buf) {
                    Ok(count) => {
                        return Ok(Fill {
                            count,
                            exhausted: count == 0,
                        });
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(e),
                }
            }
        }
    }
}
