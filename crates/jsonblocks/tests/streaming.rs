//! Chunking must be invisible: however the input is cut into refills, the
//! event stream and any error must match the whole-buffer parse.

mod common;

use common::{Ev, Recorder};
use jsonblocks::{
    Chunks, ErrorKind, HeapAllocator, ParseError, ParseOptions, Refill, parse_with,
};
use quickcheck_macros::quickcheck;

const CORPUS: [&str; 6] = [
    r#"{"a":1,"b":[true,false,null]}"#,
    r#"["ab\u0041cd", "q\"\\\/", -12.5e+10, 0.125, [{"deep": [[]]}]]"#,
    r#"(["rank","team","era"],[1,"Chi Cubs",3.12],[2,"Washington",3.53])"#,
    r#"{"m": {"n": {"o": [1, [2, [3]]]}}, "tail": "x"}"#,
    "  [\n\ttrue, \"\\n\\t\"\r\n]  ",
    "()",
];

fn run_whole(doc: &str) -> Result<Vec<Ev>, ParseError> {
    let mut sink = Recorder::default();
    jsonblocks::parse(doc.as_bytes(), &mut sink)?;
    Ok(sink.events)
}

/// Parse `doc` split at the given byte positions, all through refill.
/// Zero-length pieces are dropped: an empty chunk means end of input.
fn run_chunked(doc: &str, cuts: &[usize]) -> Result<Vec<Ev>, ParseError> {
    let bytes = doc.as_bytes();
    let mut pieces: Vec<&[u8]> = Vec::new();
    let mut prev = 0;
    for &cut in cuts {
        let cut = cut.min(bytes.len());
        if cut > prev {
            pieces.push(&bytes[prev..cut]);
            prev = cut;
        }
    }
    if prev < bytes.len() {
        pieces.push(&bytes[prev..]);
    }
    let mut src = Chunks::new(pieces.into_iter());
    let mut sink = Recorder::default();
    parse_with(
        None,
        &mut src,
        &mut sink,
        &mut HeapAllocator,
        ParseOptions::default(),
    )?;
    Ok(sink.events)
}

#[test]
fn every_two_way_split_matches_the_whole_parse() {
    for doc in CORPUS {
        let whole = run_whole(doc);
        for cut in 0..=doc.len() {
            assert_eq!(run_chunked(doc, &[cut]), whole, "doc {doc:?} cut at {cut}");
        }
    }
}

#[test]
fn byte_at_a_time_matches_the_whole_parse() {
    for doc in CORPUS {
        let cuts: Vec<usize> = (1..doc.len()).collect();
        assert_eq!(run_chunked(doc, &cuts), run_whole(doc), "doc {doc:?}");
    }
}

#[test]
fn error_positions_survive_chunking() {
    // Malformed inputs; the reported kind and position must not depend on
    // where the refill boundaries fall.
    for doc in [
        r#"{"a":1,"b":[true,fals]}"#,
        "[1,\n 01]",
        r#"(["a","b"],[1,2],[3,4,5])"#,
        r#"["ab\u00ZZ"]"#,
    ] {
        let whole = run_whole(doc).unwrap_err();
        for cut in 0..=doc.len() {
            assert_eq!(run_chunked(doc, &[cut]).unwrap_err(), whole, "cut at {cut}");
        }
    }
}

#[test]
fn initial_buffer_and_refills_compose() {
    let doc = br#"{"a":[1,2],"b":"c"}"#;
    let (head, tail) = doc.split_at(7);
    let mut src = Chunks::new(tail.chunks(3));
    let mut sink = Recorder::default();
    parse_with(
        Some(head),
        &mut src,
        &mut sink,
        &mut HeapAllocator,
        ParseOptions::default(),
    )
    .unwrap();
    let mut whole = Recorder::default();
    jsonblocks::parse(doc, &mut whole).unwrap();
    assert_eq!(sink.events, whole.events);
}

#[test]
fn empty_chunk_signals_end_of_input() {
    let mut src = Chunks::new([&b"[1,"[..], b"", b"2]"].into_iter());
    let mut sink = Recorder::default();
    let err = parse_with(
        None,
        &mut src,
        &mut sink,
        &mut HeapAllocator,
        ParseOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadInput);
    assert_eq!(err.offset, 3);
}

#[test]
fn refill_failure_surfaces_unchanged() {
    struct FlakyWire {
        sent: bool,
    }
    impl Refill for FlakyWire {
        fn refill(&mut self) -> Result<Option<&[u8]>, ErrorKind> {
            if self.sent {
                Err(ErrorKind::InputFailed)
            } else {
                self.sent = true;
                Ok(Some(b"[1, 2,"))
            }
        }
    }
    let mut sink = Recorder::default();
    let err = parse_with(
        None,
        &mut FlakyWire { sent: false },
        &mut sink,
        &mut HeapAllocator,
        ParseOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InputFailed);
    assert_eq!(err.offset, 6);
}

#[quickcheck]
fn arbitrary_chunking_is_invisible(doc_pick: usize, mut cuts: Vec<usize>) -> bool {
    let doc = CORPUS[doc_pick % CORPUS.len()];
    for cut in &mut cuts {
        *cut %= doc.len() + 1;
    }
    cuts.sort_unstable();
    cuts.dedup();
    run_chunked(doc, &cuts) == run_whole(doc)
}
