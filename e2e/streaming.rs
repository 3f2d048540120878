//! End-to-end coverage of the `Read`/`Write` streaming API.

use std::io::Cursor;
use zxc::{stream_compress, stream_compress_ex, stream_decompress, stream_get_decompressed_size};

fn sample(size: usize) -> Vec<u8> {
    zxc::lorem::gen_buffer(size, 0x5EED5EED)
}

#[test]
fn single_threaded_round_trip() {
    let data = sample(700_000);
    let mut compressed = Cursor::new(Vec::new());
    let written = stream_compress(Cursor::new(data.clone()), &mut compressed, 3, 65_536, true, 1).unwrap();
    assert_eq!(written, data.len() as u64);

    let mut out = Cursor::new(Vec::new());
    let read = stream_decompress(Cursor::new(compressed.into_inner()), &mut out, true, 1).unwrap();
    assert_eq!(read, data.len() as u64);
    assert_eq!(out.into_inner(), data);
}

#[test]
fn multi_threaded_round_trip() {
    let data = sample(4_000_000);
    let mut compressed = Cursor::new(Vec::new());
    stream_compress(Cursor::new(data.clone()), &mut compressed, 3, 131_072, true, 4).unwrap();

    let mut out = Cursor::new(Vec::new());
    stream_decompress(Cursor::new(compressed.into_inner()), &mut out, true, 1).unwrap();
    assert_eq!(out.into_inner(), data);
}

#[test]
fn single_and_multi_threaded_paths_agree_on_uncompressed_output() {
    let data = sample(1_500_000);

    let mut single = Cursor::new(Vec::new());
    stream_compress(Cursor::new(data.clone()), &mut single, 3, 65_536, true, 1).unwrap();
    let mut single_out = Cursor::new(Vec::new());
    stream_decompress(Cursor::new(single.into_inner()), &mut single_out, true, 1).unwrap();

    let mut multi = Cursor::new(Vec::new());
    stream_compress(Cursor::new(data.clone()), &mut multi, 3, 65_536, true, 3).unwrap();
    let mut multi_out = Cursor::new(Vec::new());
    stream_decompress(Cursor::new(multi.into_inner()), &mut multi_out, true, 1).unwrap();

    assert_eq!(single_out.into_inner(), data);
    assert_eq!(multi_out.into_inner(), data);
}

#[test]
fn progress_callback_reports_monotonic_cumulative_bytes() {
    let data = sample(900_000);
    let mut seen = Vec::new();
    let mut cb = |processed: u64, _total: u64| seen.push(processed);
    let mut compressed = Cursor::new(Vec::new());
    stream_compress_ex(Cursor::new(data.clone()), &mut compressed, 2, 65_536, true, 1, Some(&mut cb)).unwrap();

    assert!(!seen.is_empty());
    for pair in seen.windows(2) {
        assert!(pair[1] >= pair[0], "progress must be non-decreasing: {:?}", seen);
    }
    assert_eq!(*seen.last().unwrap(), data.len() as u64);
}

#[test]
fn stream_get_decompressed_size_matches_footer() {
    let data = sample(250_000);
    let mut compressed = Cursor::new(Vec::new());
    stream_compress(Cursor::new(data.clone()), &mut compressed, 3, 32_768, true, 1).unwrap();

    let size = stream_get_decompressed_size(Cursor::new(compressed.into_inner())).unwrap();
    assert_eq!(size, data.len() as u64);
}

#[test]
fn empty_stream_round_trips() {
    let mut compressed = Cursor::new(Vec::new());
    stream_compress(Cursor::new(Vec::new()), &mut compressed, 1, 65_536, true, 1).unwrap();

    let mut out = Cursor::new(Vec::new());
    let read = stream_decompress(Cursor::new(compressed.into_inner()), &mut out, true, 1).unwrap();
    assert_eq!(read, 0);
    assert!(out.into_inner().is_empty());
}
