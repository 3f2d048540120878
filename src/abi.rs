//! C-ABI shims exporting the library's one-shot whole-buffer API.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `target/release/libzxc.a` exposes `zxc_compress_bound`,
//! `zxc_compress`, `zxc_decompress`, and `zxc_get_decompressed_size` for
//! linking from C, mirroring [`crate::codec`] one for one.

use std::os::raw::c_int;
use std::slice;

use crate::codec::{compress, compress_bound, decompress, get_decompressed_size};

// ─────────────────────────────────────────────────────────────────────────────
// zxc_compress_bound
//
// size_t zxc_compress_bound(size_t input_size, size_t block_size);
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub extern "C" fn zxc_compress_bound(input_size: usize, block_size: usize) -> usize {
    if block_size == 0 {
        return 0;
    }
    compress_bound(input_size, block_size)
}

// ─────────────────────────────────────────────────────────────────────────────
// zxc_compress
//
// long long zxc_compress(const unsigned char *src, size_t src_size,
//                        unsigned char *dst, size_t dst_capacity,
//                        int level, size_t block_size, int checksum);
//
// Returns the number of bytes written to dst, or -1 if dst_capacity is too
// small or an argument is invalid.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn zxc_compress(
    src: *const u8,
    src_size: usize,
    dst: *mut u8,
    dst_capacity: usize,
    level: c_int,
    block_size: usize,
    checksum: c_int,
) -> i64 {
    if (src.is_null() && src_size > 0) || dst.is_null() || block_size == 0 {
        return -1;
    }
    if level < 1 || level > 255 {
        return -1;
    }
    let src_slice = if src_size == 0 {
        &[]
    } else {
        slice::from_raw_parts(src, src_size)
    };
    let out = compress(src_slice, level as u8, block_size, checksum != 0);
    if out.len() > dst_capacity {
        return -1;
    }
    let dst_slice = slice::from_raw_parts_mut(dst, out.len());
    dst_slice.copy_from_slice(&out);
    out.len() as i64
}

// ─────────────────────────────────────────────────────────────────────────────
// zxc_decompress
//
// long long zxc_decompress(const unsigned char *src, size_t src_size,
//                          unsigned char *dst, size_t dst_capacity);
//
// Returns the number of bytes written to dst, or -1 on a malformed stream or
// a dst buffer too small to hold the decompressed data.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn zxc_decompress(
    src: *const u8,
    src_size: usize,
    dst: *mut u8,
    dst_capacity: usize,
) -> i64 {
    if src.is_null() || dst.is_null() {
        return -1;
    }
    let src_slice = slice::from_raw_parts(src, src_size);
    match decompress(src_slice) {
        Ok(out) => {
            if out.len() > dst_capacity {
                return -1;
            }
            let dst_slice = slice::from_raw_parts_mut(dst, out.len());
            dst_slice.copy_from_slice(&out);
            out.len() as i64
        }
        Err(_) => -1,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// zxc_get_decompressed_size
//
// long long zxc_get_decompressed_size(const unsigned char *src, size_t src_size);
//
// Returns the uncompressed size recorded in a stream's footer, or -1 if the
// stream is too short or malformed.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn zxc_get_decompressed_size(src: *const u8, src_size: usize) -> i64 {
    if src.is_null() {
        return -1;
    }
    let src_slice = slice::from_raw_parts(src, src_size);
    match get_decompressed_size(src_slice) {
        Ok(n) => n as i64,
        Err(_) => -1,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] =
        b"Hello, ZXC ABI! Hello, ZXC ABI! Hello, ZXC ABI! This is a test.";

    unsafe fn compress_via_abi(src: &[u8]) -> Vec<u8> {
        let bound = zxc_compress_bound(src.len(), 4096);
        let mut dst = vec![0u8; bound];
        let n = zxc_compress(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len(), 3, 4096, 1);
        assert!(n > 0, "zxc_compress returned {n}");
        dst.truncate(n as usize);
        dst
    }

    #[test]
    fn compress_bound_zero_block_size_returns_zero() {
        assert_eq!(zxc_compress_bound(100, 0), 0);
    }

    #[test]
    fn compress_decompress_basic_roundtrip() {
        unsafe {
            let compressed = compress_via_abi(SAMPLE);
            let mut out = vec![0u8; SAMPLE.len()];
            let n = zxc_decompress(compressed.as_ptr(), compressed.len(), out.as_mut_ptr(), out.len());
            assert_eq!(n as usize, SAMPLE.len());
            assert_eq!(&out, SAMPLE);
        }
    }

    #[test]
    fn compress_null_src_with_nonzero_size_returns_negative_one() {
        unsafe {
            let mut dst = [0u8; 64];
            let n = zxc_compress(std::ptr::null(), 10, dst.as_mut_ptr(), dst.len(), 3, 4096, 1);
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn compress_null_dst_returns_negative_one() {
        unsafe {
            let n = zxc_compress(SAMPLE.as_ptr(), SAMPLE.len(), std::ptr::null_mut(), 128, 3, 4096, 1);
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn compress_zero_level_returns_negative_one() {
        unsafe {
            let mut dst = [0u8; 128];
            let n = zxc_compress(SAMPLE.as_ptr(), SAMPLE.len(), dst.as_mut_ptr(), dst.len(), 0, 4096, 1);
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn compress_too_small_dst_returns_negative_one() {
        unsafe {
            let mut dst = [0u8; 2];
            let n = zxc_compress(SAMPLE.as_ptr(), SAMPLE.len(), dst.as_mut_ptr(), dst.len(), 3, 4096, 1);
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn compress_empty_input_produces_valid_stream() {
        unsafe {
            let bound = zxc_compress_bound(0, 4096);
            let mut dst = vec![0u8; bound];
            let n = zxc_compress(std::ptr::null(), 0, dst.as_mut_ptr(), dst.len(), 1, 4096, 1);
            assert!(n >= 0);
        }
    }

    #[test]
    fn decompress_null_src_returns_negative_one() {
        unsafe {
            let mut dst = [0u8; 64];
            let n = zxc_decompress(std::ptr::null(), 10, dst.as_mut_ptr(), dst.len());
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn decompress_corrupt_data_returns_negative_one() {
        unsafe {
            let garbage = [0xFFu8; 32];
            let mut dst = [0u8; 128];
            let n = zxc_decompress(garbage.as_ptr(), garbage.len(), dst.as_mut_ptr(), dst.len());
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn decompress_too_small_dst_returns_negative_one() {
        unsafe {
            let compressed = compress_via_abi(SAMPLE);
            let mut dst = [0u8; 4];
            let n = zxc_decompress(compressed.as_ptr(), compressed.len(), dst.as_mut_ptr(), dst.len());
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn get_decompressed_size_matches_original_length() {
        unsafe {
            let compressed = compress_via_abi(SAMPLE);
            let n = zxc_get_decompressed_size(compressed.as_ptr(), compressed.len());
            assert_eq!(n as usize, SAMPLE.len());
        }
    }

    #[test]
    fn get_decompressed_size_null_src_returns_negative_one() {
        unsafe {
            let n = zxc_get_decompressed_size(std::ptr::null(), 10);
            assert_eq!(n, -1);
        }
    }

    #[test]
    fn get_decompressed_size_too_short_stream_returns_negative_one() {
        unsafe {
            let garbage = [0u8; 4];
            let n = zxc_get_decompressed_size(garbage.as_ptr(), garbage.len());
            assert_eq!(n, -1);
        }
    }
}
