//! ZXC — a general-purpose lossless LZ77-family byte-stream compressor with
//! a self-describing, checksummed block format.
//!
//! | Module | Covers |
//! |---|---|
//! | [`error`] | `ZxcError`/`ZxcResult`, the error type crossing every public boundary |
//! | [`bits`] | little-endian accessors, prefix-varint, ZigZag delta, bit packing |
//! | [`crc`] | CRC-8/SMBUS and CRC-16/XMODEM header checksums |
//! | [`xxhash`] | xxh3-32/64 content hashing |
//! | [`format`] | on-disk file/block/sub-format headers and footers |
//! | [`block`] | match finder, GLO/GHI/NUM block encoders, and the block decoder |
//! | [`dispatch`] | runtime-selected block encoder function pointer |
//! | [`context`] | per-worker compression/decompression scratch state |
//! | [`codec`] | one-shot `compress`/`decompress` over in-memory buffers |
//! | [`pipeline`] | ring-buffered multi-threaded streaming compression engine |
//! | [`stream`] | public streaming API over `Read`/`Write` |

pub mod bits;
pub mod block;
pub mod cli;
pub mod codec;
pub mod config;
pub mod context;
pub mod crc;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod io;
pub mod lorem;
pub mod pipeline;
pub mod stream;
pub mod timefn;
pub mod util;
pub mod xxhash;

#[cfg(feature = "c-abi")]
pub mod abi;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// Error kind shared by every public entry point.
pub use error::{ZxcError, ZxcResult};

/// One-shot compression. Equivalent to the language-neutral `compress`.
pub use codec::compress;
/// One-shot decompression. Equivalent to the language-neutral `decompress`.
pub use codec::decompress;
/// Worst-case compressed size for a given input size and block size.
pub use codec::compress_bound;
/// Read the uncompressed size from a complete stream's footer.
pub use codec::get_decompressed_size;

/// Streaming compression over `Read`/`Write`, with an optional worker pool.
pub use stream::{stream_compress, stream_compress_ex};
/// Streaming decompression over `Read`/`Write`.
pub use stream::{stream_decompress, stream_decompress_ex};
/// Footer-only uncompressed-size probe over a seekable stream.
pub use stream::stream_get_decompressed_size;

/// Ring-buffered multi-threaded compression engine, used directly by
/// callers who already hold the whole input in memory.
pub use pipeline::compress_parallel;

/// Stable error-name lookup for the language-neutral `error_name(code)` API.
pub use error::error_name;

// ─────────────────────────────────────────────────────────────────────────────
// Version
// ─────────────────────────────────────────────────────────────────────────────

pub const ZXC_VERSION_MAJOR: u32 = 0;
pub const ZXC_VERSION_MINOR: u32 = 7;
pub const ZXC_VERSION_PATCH: u32 = 3;
pub const ZXC_VERSION_STRING: &str = "0.7.3";

/// Returns the library version number (e.g. 700 for v0.7.0, patch folded in below the hundreds digit).
pub fn version_number() -> u32 {
    ZXC_VERSION_MAJOR * 100 * 100 + ZXC_VERSION_MINOR * 100 + ZXC_VERSION_PATCH
}

/// Returns the library version string (e.g. `"0.7.3"`).
pub fn version_string() -> &'static str {
    ZXC_VERSION_STRING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_round_trip_matches_codec_round_trip() {
        let data = b"zxc zxc zxc zxc top level reexport smoke test".repeat(10);
        let compressed = compress(&data, 3, 4096, true);
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn version_number_matches_cargo_toml() {
        assert_eq!(version_number(), 700 + 3);
        assert_eq!(version_string(), "0.7.3");
    }
}
