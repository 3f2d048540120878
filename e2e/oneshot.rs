//! End-to-end coverage of the one-shot whole-buffer API (`zxc::compress`/`decompress`).

use zxc::{compress, compress_bound, decompress, get_decompressed_size};

fn sample(size: usize) -> Vec<u8> {
    zxc::lorem::gen_buffer(size, 0xABCD1234)
}

#[test]
fn round_trip_across_levels_and_block_sizes() {
    let data = sample(500_000);
    for level in 1..=5u8 {
        for block_size in [4096usize, 65_536, 1_000_000] {
            let compressed = compress(&data, level, block_size, true);
            let decompressed = decompress(&compressed).unwrap();
            assert_eq!(decompressed, data, "level={level} block_size={block_size}");
        }
    }
}

#[test]
fn round_trip_without_checksum() {
    let data = sample(200_000);
    let compressed = compress(&data, 3, 65_536, false);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn round_trip_empty_input() {
    let compressed = compress(&[], 3, 65_536, true);
    let decompressed = decompress(&compressed).unwrap();
    assert!(decompressed.is_empty());
}

#[test]
fn round_trip_smaller_than_one_block() {
    let data = b"a short message, well under one block".to_vec();
    let compressed = compress(&data, 1, 65_536, true);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn round_trip_incompressible_data() {
    // Pseudo-random bytes via a simple xorshift, unlikely to compress at all.
    let mut state: u32 = 0x9E3779B9;
    let data: Vec<u8> = (0..300_000)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        })
        .collect();
    let compressed = compress(&data, 5, 65_536, true);
    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn compress_bound_never_underestimates() {
    let data = sample(333_333);
    let block_size = 65_536;
    let bound = compress_bound(data.len(), block_size);
    let compressed = compress(&data, 1, block_size, true);
    assert!(compressed.len() <= bound, "compressed {} exceeds bound {}", compressed.len(), bound);
}

#[test]
fn get_decompressed_size_matches_original_length() {
    let data = sample(123_456);
    let compressed = compress(&data, 2, 32_768, true);
    assert_eq!(get_decompressed_size(&compressed).unwrap(), data.len() as u64);
}

#[test]
fn decompress_rejects_truncated_stream() {
    let data = sample(50_000);
    let compressed = compress(&data, 3, 16_384, true);
    let truncated = &compressed[..compressed.len() - 20];
    assert!(decompress(truncated).is_err());
}

#[test]
fn decompress_rejects_corrupted_payload() {
    let data = sample(50_000);
    let mut compressed = compress(&data, 3, 16_384, true);
    let mid = compressed.len() / 2;
    compressed[mid] ^= 0xFF;
    // Corruption inside a checksummed block must surface as an error rather
    // than silently returning wrong bytes.
    assert!(decompress(&compressed).is_err());
}

#[test]
fn repeated_data_compresses_smaller_than_input() {
    let data = b"the quick brown fox jumps over the lazy dog. ".repeat(2000);
    let compressed = compress(&data, 3, 65_536, true);
    assert!(compressed.len() < data.len());
}
