#![expect(missing_docs)]

use std::io::{self, Cursor, Read};

use scanbuf::{ByteSource, Cursors, FixedReader, GrowingReader, IoSource, ReadError};

/// Returns `Interrupted` on every other call and at most `chunk` bytes
/// otherwise.
struct Flaky<R> {
    inner: R,
    chunk: usize,
    interrupt: bool,
}

impl<R: Read> Read for Flaky<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        let len = buf.len().min(self.chunk);
        self.inner.read(&mut buf[..len])
    }
}

/// Delivers its bytes, then fails.
struct Unplugged<'a>(&'a [u8]);

impl Read for Unplugged<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0.is_empty() {
            return Err(io::Error::other("unplugged"));
        }
        self.0.read(buf)
    }
}

/// Has `ready` available, then blocks waiting for more.
struct Pipe {
    ready: &'static [u8],
    reads: usize,
}

impl Read for Pipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        if self.ready.is_empty() {
            return Err(io::Error::new(io::ErrorKind::WouldBlock, "no more data yet"));
        }
        self.ready.read(buf)
    }
}

fn would_block<T>(result: Result<T, ReadError<io::Error>>) -> bool {
    matches!(result, Err(ReadError::Source(e)) if e.kind() == io::ErrorKind::WouldBlock)
}

#[test]
fn fill_passes_short_reads_through() {
    let mut src = IoSource::new(Flaky {
        inner: Cursor::new(b"abcdefgh".to_vec()),
        chunk: 3,
        interrupt: false,
    });
    let mut buf = [0u8; 5];
    let mut fills = Vec::new();
    loop {
        let fill = src.fill(&mut buf).unwrap();
        fills.push((String::from_utf8(buf[..fill.count].to_vec()).unwrap(), fill.exhausted));
        if fill.exhausted {
            break;
        }
    }
    assert_eq!(
        fills,
        [
            ("abc".to_owned(), false),
            ("def".to_owned(), false),
            ("gh".to_owned(), false),
            (String::new(), true),
        ]
    );
    assert_eq!(src.get_ref().inner.position(), 8);
}

#[test]
fn growing_reader_delivers_available_record() {
    let mut cur = Cursors::new();
    let mut r = GrowingReader::new(
        IoSource::new(Pipe {
            ready: b"a\n",
            reads: 0,
        }),
        b'\n',
    );
    assert_eq!(r.read(&mut cur).unwrap(), 2);
    assert_eq!(r.window(&cur), b"a\n");
    assert!(!cur.at_eof());

    cur.p = cur.pe;
    assert!(would_block(r.read(&mut cur)));
    let (source, window) = r.into_inner();
    assert!(window.is_empty());
    assert_eq!(source.into_inner().reads, 2);
}

#[test]
fn fixed_reader_delivers_available_bytes() {
    let mut cur = Cursors::new();
    let mut r = FixedReader::new(
        IoSource::new(Pipe {
            ready: b"a\n",
            reads: 0,
        }),
        vec![0u8; 16],
    );
    assert_eq!(r.read(&mut cur).unwrap(), 2);
    assert_eq!(r.window(&cur), b"a\n");

    // Nothing consumed: the window stays while the source blocks.
    assert!(would_block(r.read(&mut cur)));
    assert_eq!(r.window(&cur), b"a\n");
    assert_eq!(r.source().get_ref().reads, 2);
}

#[test]
fn fixed_reader_over_io() {
    let mut cur = Cursors::new();
    let mut r = FixedReader::new(
        IoSource::new(Cursor::new(b"Hello,\nWorld!\n".to_vec())),
        vec![0u8; 10],
    );
    let mut lines = Vec::new();
    loop {
        if let Err(e) = r.read(&mut cur) {
            assert!(e.is_end_of_input(), "{e}");
            break;
        }
        r.backup_to(&mut cur, b'\n').unwrap();
        lines.push(String::from_utf8(r.window(&cur).to_vec()).unwrap());
        cur.p = cur.pe;
    }
    assert_eq!(lines, ["Hello,\n", "World!\n"]);
    assert_eq!(r.stream_offset(), 14);
}

#[test]
fn growing_reader_over_interrupted_io() {
    let mut cur = Cursors::new();
    let mut r = GrowingReader::new(
        IoSource::new(Flaky {
            inner: Cursor::new(b"first\nsecond\n".to_vec()),
            chunk: 2,
            interrupt: false,
        }),
        b'\n',
    );
    r.read(&mut cur).unwrap();
    assert_eq!(r.window(&cur), b"first\n");
    cur.p = cur.pe;
    r.read(&mut cur).unwrap();
    assert_eq!(r.window(&cur), b"second\n");
    cur.p = cur.pe;
    assert!(matches!(r.read(&mut cur), Err(ReadError::EndOfInput)));
}

#[test]
fn io_errors_pass_through() {
    let mut cur = Cursors::new();
    let mut r = GrowingReader::new(IoSource::new(Unplugged(b"abc")), b'\n');
    let err = r.read(&mut cur).unwrap_err();
    assert!(err.is_terminal());
    // The cause is reported once, through the error chain.
    assert_eq!(err.to_string(), "source error");
    assert_eq!(
        std::error::Error::source(&err).map(ToString::to_string).as_deref(),
        Some("unplugged")
    );
    match err {
        ReadError::Source(e) => assert_eq!(e.to_string(), "unplugged"),
        other => panic!("unexpected {other}"),
    }
    assert_eq!(r.data(), b"");
}
