#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scanbuf::{FixedScanner, GrowOptions, GrowingScanner, MarkerNotFound, ReadError, ScanCursors};

#[derive(Debug, Arbitrary)]
enum Op {
    Advance(u8),
    Stay,
    Backup(u8),
    StartToken,
    ClearToken,
}

#[derive(Debug, Arbitrary)]
struct Case {
    input: Vec<u8>,
    /// Fixed capacity, or growing read size.
    size: u8,
    growing: bool,
    ops: Vec<Op>,
}

enum Scanner<'a> {
    Fixed(FixedScanner<&'a [u8]>),
    Growing(GrowingScanner<&'a [u8]>),
}

impl Scanner<'_> {
    fn read(&mut self, cur: &mut ScanCursors) -> Result<usize, ReadError<core::convert::Infallible>> {
        match self {
            Scanner::Fixed(s) => s.read(cur),
            Scanner::Growing(s) => s.read(cur),
        }
    }

    fn backup_to(&mut self, cur: &mut ScanCursors, marker: u8) -> Result<(), MarkerNotFound> {
        match self {
            Scanner::Fixed(s) => s.backup_to(cur, marker),
            Scanner::Growing(s) => s.backup_to(cur, marker),
        }
    }

    fn data(&self) -> &[u8] {
        match self {
            Scanner::Fixed(s) => s.data(),
            Scanner::Growing(s) => s.data(),
        }
    }

    fn offset(&self) -> usize {
        let off = match self {
            Scanner::Fixed(s) => s.reader().stream_offset(),
            Scanner::Growing(s) => s.reader().stream_offset(),
        };
        usize::try_from(off).unwrap()
    }

    fn buffered(&self) -> usize {
        match self {
            Scanner::Fixed(s) => s.reader().buffered(),
            Scanner::Growing(s) => s.reader().buffered(),
        }
    }
}

fn check(s: &Scanner<'_>, cur: &ScanCursors, input: &[u8]) {
    let off = s.offset();
    assert!(cur.is_valid_for(s.data().len()), "{cur:?}");
    assert_eq!(&s.data()[..cur.pe], &input[off..off + cur.pe]);
    assert!(off + s.buffered() <= input.len());
    if let Scanner::Growing(_) = s {
        assert_eq!(s.data().len(), cur.pe);
    }
}

fn run(case: Case) {
    let input = &case.input[..];
    let size = 1 + usize::from(case.size % 64);
    let mut s = if case.growing {
        let options = GrowOptions {
            initial_capacity: size,
            read_size: size,
            max_capacity: 1 << 16,
        };
        Scanner::Growing(GrowingScanner::with_options(input, b'\n', options))
    } else {
        Scanner::Fixed(FixedScanner::new(input, vec![0u8; size]))
    };

    let mut cur = ScanCursors::new();
    let mut ops = case.ops.into_iter();
    let mut consumed = Vec::with_capacity(input.len());
    for _ in 0..2 * (input.len() + ops.len()) + 4 {
        let before = cur;
        match s.read(&mut cur) {
            Ok(_) | Err(ReadError::UnexpectedEndOfInput) => {}
            Err(ReadError::EndOfInput) => {
                check(&s, &cur, input);
                consumed.extend_from_slice(&s.data()[cur.p..cur.pe]);
                assert_eq!(consumed, input);
                return;
            }
            Err(ReadError::BufferFull { capacity }) => {
                assert_eq!(cur, before);
                assert_eq!(cur.pe, capacity);
                cur.clear_token();
                consumed.extend_from_slice(&s.data()[cur.p..cur.pe]);
                cur.p = cur.pe;
                continue;
            }
            Err(ReadError::CapacityExceeded { .. }) => return,
            Err(e) => panic!("{e}"),
        }
        check(&s, &cur, input);

        match ops.next() {
            Some(Op::Advance(n)) => {
                let end = (cur.p + usize::from(n)).min(cur.pe);
                consumed.extend_from_slice(&s.data()[cur.p..end]);
                cur.p = end;
            }
            Some(Op::Stay) => {}
            Some(Op::Backup(marker)) => {
                let pe = cur.pe;
                if s.backup_to(&mut cur, marker).is_ok() {
                    assert!(cur.pe <= pe);
                }
                check(&s, &cur, input);
                if s.data()[..cur.pe].last() != Some(&marker) {
                    assert_eq!(cur.pe, pe);
                }
            }
            Some(Op::StartToken) => {
                if cur.ts.is_none() {
                    cur.start_token(cur.p);
                }
            }
            Some(Op::ClearToken) => cur.clear_token(),
            None => {
                consumed.extend_from_slice(&s.data()[cur.p..cur.pe]);
                cur.p = cur.pe;
            }
        }
    }
    panic!("no end of input after {} bytes", input.len());
}

fuzz_target!(|case: Case| run(case));
