//! End-to-end coverage of malformed-input and negative-path behaviour across
//! the one-shot, streaming, and filename-level APIs.

use std::io::Cursor;
use zxc::error::ZxcError;
use zxc::{compress, decompress, get_decompressed_size, stream_decompress};

fn sample(size: usize) -> Vec<u8> {
    zxc::lorem::gen_buffer(size, 0xFEEDFACE)
}

#[test]
fn decompress_empty_buffer_is_src_too_small() {
    let err = decompress(&[]).unwrap_err();
    assert_eq!(err, ZxcError::SrcTooSmall);
}

#[test]
fn decompress_short_buffer_is_src_too_small() {
    let err = decompress(&[0u8; 4]).unwrap_err();
    assert_eq!(err, ZxcError::SrcTooSmall);
}

#[test]
fn decompress_bad_magic_is_rejected() {
    let data = sample(10_000);
    let mut compressed = compress(&data, 2, 16_384, true);
    compressed[0] ^= 0xFF;
    compressed[1] ^= 0xFF;
    let err = decompress(&compressed).unwrap_err();
    assert!(matches!(err, ZxcError::BadMagic | ZxcError::BadHeader));
}

#[test]
fn decompress_truncated_footer_is_rejected() {
    let data = sample(10_000);
    let compressed = compress(&data, 2, 16_384, true);
    let truncated = &compressed[..compressed.len() - 4];
    assert!(decompress(truncated).is_err());
}

#[test]
fn get_decompressed_size_on_garbage_fails() {
    let garbage = [0x11u8; 32];
    assert!(get_decompressed_size(&garbage).is_err());
}

#[test]
fn error_codes_are_stable_negative_integers() {
    assert!(ZxcError::Memory.code() < 0);
    assert!(ZxcError::BadChecksum.code() < 0);
    assert_ne!(ZxcError::Memory.code(), ZxcError::BadChecksum.code());
}

#[test]
fn error_name_lookup_round_trips_through_code() {
    for err in [
        ZxcError::Memory,
        ZxcError::DstTooSmall,
        ZxcError::SrcTooSmall,
        ZxcError::BadMagic,
        ZxcError::BadVersion,
        ZxcError::BadHeader,
        ZxcError::BadChecksum,
        ZxcError::CorruptData,
        ZxcError::BadOffset,
        ZxcError::Overflow,
        ZxcError::NullInput,
        ZxcError::BadBlockType,
    ] {
        let name = zxc::error_name(err.code());
        assert!(!name.is_empty(), "error_name({}) returned empty string", err.code());
    }
}

#[test]
fn streaming_decompress_rejects_corrupt_header() {
    let garbage = vec![0u8; 64];
    let mut out = Cursor::new(Vec::new());
    let result = stream_decompress(Cursor::new(garbage), &mut out, true, 1);
    assert!(result.is_err());
}

#[test]
fn streaming_decompress_rejects_truncated_stream() {
    let data = sample(50_000);
    let compressed = compress(&data, 2, 16_384, true);
    let truncated = compressed[..compressed.len() - 10].to_vec();
    let mut out = Cursor::new(Vec::new());
    let result = stream_decompress(Cursor::new(truncated), &mut out, true, 1);
    assert!(result.is_err());
}

#[cfg(test)]
mod filename_level {
    use tempfile::tempdir;
    use zxc::io::{decompress_filename, Prefs};

    #[test]
    fn decompressing_nonexistent_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.zxc");
        let prefs = Prefs::default();
        let result = decompress_filename(missing.to_str().unwrap(), None, &prefs);
        assert!(result.is_err());
    }

    #[test]
    fn decompressing_a_non_archive_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt.zxc");
        std::fs::write(&path, b"not a real zxc archive").unwrap();
        let prefs = Prefs::default();
        let result = decompress_filename(path.to_str().unwrap(), None, &prefs);
        assert!(result.is_err());
    }
}
