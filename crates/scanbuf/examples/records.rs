//! Splits standard input into newline-terminated records, once with a fixed
//! 1 MiB buffer that backs up to the last newline of every window and once
//! with a growing buffer that reads exactly one record per call.
//!
//! Run with
//!
//! ```bash
//! printf 'Hello,\nWorld!\n' | cargo run -p scanbuf --example records -- fixed
//! printf 'Hello,\nWorld!\n' | RUST_LOG=scanbuf=trace cargo run -p scanbuf --example records -- growing
//! ```
#![allow(missing_docs)]

use std::io::{self, Write};

use bstr::ByteSlice;
use scanbuf::{Cursors, FixedReader, GrowingReader, IoSource, ReadError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Stands in for a generated scanner's `%% write exec;` block.
fn exec(window: &[u8], out: &mut impl Write) -> io::Result<()> {
    for line in window.lines() {
        writeln!(out, "{:?}", line.as_bstr())?;
    }
    Ok(())
}

fn fixed(out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut cur = Cursors::new();
    let mut reader = FixedReader::new(IoSource::new(io::stdin().lock()), vec![0u8; 1 << 20]);
    loop {
        match reader.read(&mut cur) {
            Ok(_) => {}
            Err(ReadError::EndOfInput) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
        // A partial line waits for more input; a full buffer reports
        // `BufferFull`. At the end a line without a newline is still a record.
        if reader.backup_to(&mut cur, b'\n').is_err() && !cur.at_eof() {
            continue;
        }
        exec(reader.window(&cur), out)?;
        cur.p = cur.pe;
    }
}

fn growing(out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut cur = Cursors::new();
    let mut reader = GrowingReader::new(IoSource::new(io::stdin().lock()), b'\n');
    loop {
        match reader.read(&mut cur) {
            Ok(_) | Err(ReadError::UnexpectedEndOfInput) => {}
            Err(ReadError::EndOfInput) => return Ok(()),
            Err(e) => return Err(e.into()),
        }
        exec(reader.window(&cur), out)?;
        cur.p = cur.pe;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(EnvFilter::from_default_env())
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "fixed".to_owned());
    let mut out = io::stdout().lock();
    match mode.as_str() {
        "fixed" => fixed(&mut out),
        "growing" => growing(&mut out),
        other => Err(format!("unknown mode {other:?}, expected `fixed` or `growing`").into()),
    }
}
