//! Byte sources with awkward delivery patterns.

use core::convert::Infallible;

use crate::{ByteSource, Fill};

/// Delivers at most `chunk` bytes per fill and only reports exhaustion on a
/// fill that finds nothing left, like `std::io::Read`.
#[derive(Debug)]
pub(crate) struct Trickle<'a> {
    rest: &'a [u8],
    chunk: usize,
}

impl<'a> Trickle<'a> {
    pub(crate) fn new(rest: &'a [u8], chunk: usize) -> Self {
        Self {
            rest,
            chunk: chunk.max(1),
        }
    }
}

impl ByteSource for Trickle<'_> {
    type Error = Infallible;

    fn fill(&mut self, buf: &mut [u8]) -> Result<Fill, Infallible> {
        if self.rest.is_empty() {
            return Ok(Fill {
                count: 0,
                exhausted: true,
            });
        }
        let count = buf.len().min(self.chunk).min(self.rest.len());
        buf[..count].copy_from_slice(&self.rest[..count]);
        self.rest = &self.rest[count..];
        Ok(Fill {
            count,
            exhausted: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Broken(pub(crate) &'static str);

impl core::fmt::Display for Broken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

impl core::error::Error for Broken {}

/// Delivers `ok` and then fails on every later fill.
#[derive(Debug)]
pub(crate) struct FailAfter<'a> {
    pub(crate) ok: &'a [u8],
}

impl ByteSource for FailAfter<'_> {
    type Error = Broken;

    fn fill(&mut self, buf: &mut [u8]) -> Result<Fill, Broken> {
        if self.ok.is_empty() {
            return Err(Broken("device unplugged"));
        }
        let count = buf.len().min(self.ok.len());
        buf[..count].copy_from_slice(&self.ok[..count]);
        self.ok = &self.ok[count..];
        Ok(Fill {
            count,
            exhausted: false,
        })
    }
}

#[test]
fn slice_source_reports_exhaustion_with_last_bytes() {
    let mut src: &[u8] = b"abcdef";
    let mut buf = [0u8; 4];
    assert_eq!(
        src.fill(&mut buf),
        Ok(Fill {
            count: 4,
            exhausted: false
        })
    );
    assert_eq!(
        src.fill(&mut buf),
        Ok(Fill {
            count: 2,
            exhausted: true
        })
    );
    assert_eq!(&buf[..2], b"ef");
}

#[test]
fn trickle_reports_exhaustion_on_empty_fill() {
    let mut src = Trickle::new(b"abc", 2);
    let mut buf = [0u8; 8];
    assert_eq!(src.fill(&mut buf).unwrap().count, 2);
    let last = src.fill(&mut buf).unwrap();
    assert_eq!((last.count, last.exhausted), (1, false));
    assert!(src.fill(&mut buf).unwrap().exhausted);
}

#[test]
fn mut_ref_forwards() {
    let mut inner: &[u8] = b"xy";
    let mut src = &mut inner;
    let mut buf = [0u8; 1];
    assert_eq!(ByteSource::fill(&mut src, &mut buf).unwrap().count, 1);
    assert_eq!(inner, b"y");
}
