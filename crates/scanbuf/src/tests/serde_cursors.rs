use insta::assert_yaml_snapshot;

use crate::{Cursors, FixedScanner, GrowOptions, ScanCursors};

#[test]
fn snapshot_cursors_mid_token() {
    let mut cur = ScanCursors::new();
    let mut s = FixedScanner::new(&br#"say "hello world""#[..], alloc::vec![0u8; 8]);
    s.read(&mut cur).unwrap();
    cur.start_token(4);
    cur.p = cur.pe;
    s.read(&mut cur).unwrap();

    assert_yaml_snapshot!(cur, @r"
    p: 4
    pe: 8
    ts: 0
    te: ~
    eof: ~
    ");
    assert_yaml_snapshot!(Cursors::from(cur), @r"
    p: 4
    pe: 8
    eof: ~
    ");
}

#[test]
fn grow_options_fill_missing_fields() {
    let options: GrowOptions = serde_yaml::from_str("max_capacity: 1024").unwrap();
    assert_eq!(
        options,
        GrowOptions {
            max_capacity: 1024,
            ..GrowOptions::default()
        }
    );
}
