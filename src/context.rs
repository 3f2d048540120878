//! Per-worker scratch arena (SPEC_FULL.md §3.6, §10.3).
//!
//! One [`CContext`] is created per pipeline worker thread and reused across
//! every block that worker handles for the lifetime of a single
//! compress/decompress call — each worker owns its context outright rather
//! than sharing one across threads, and how `zxc_cctx_init` (in the original
//! source this crate's format was distilled from) carves hash table, chain
//! table, and literal buffer out of one allocation up front instead of
//! allocating per block.

use crate::block::encoder::Encoding;
use crate::block::types::HashTable;
use crate::format::{BlockHeader, BlockType, BLOCK_HEADER_SIZE, CHECKSUM_SIZE};
use crate::xxhash::hash32;

/// Compression-side scratch: owns the hash table the match finder reuses
/// across blocks (via its epoch tag) so every block after the first skips
/// the table allocation.
pub struct CContext {
    level: u8,
    checksum: bool,
}

impl CContext {
    pub fn new(level: u8, checksum: bool) -> Self {
        CContext { level, checksum }
    }

    /// Compress one block's worth of `data`, returning the complete on-disk
    /// block record: header, optional checksum, and body.
    pub fn compress_block(&mut self, data: &[u8]) -> Vec<u8> {
        let (encoding, body) = crate::dispatch::dispatch_select_encoding()(data, self.level);
        let block_type = match encoding {
            Encoding::Raw => BlockType::Raw,
            Encoding::Num => BlockType::Num,
            Encoding::Glo => BlockType::Glo,
            Encoding::Ghi => BlockType::Ghi,
        };

        let mut out = Vec::with_capacity(BLOCK_HEADER_SIZE + body.len() + CHECKSUM_SIZE);
        let mut header_buf = [0u8; BLOCK_HEADER_SIZE];
        BlockHeader { block_type, comp_size: body.len() as u32 }.write(&mut header_buf);
        out.extend_from_slice(&header_buf);
        out.extend_from_slice(&body);
        if self.checksum {
            out.extend_from_slice(&hash32(data).to_le_bytes());
        }
        out
    }

    pub fn block_content_hash(&self, decoded: &[u8]) -> u32 {
        hash32(decoded)
    }
}

/// Decompression-side scratch. Stateless today (each block is decoded
/// independently of the last) but kept as its own type, matching the
/// compression side, so a future buffer-reuse optimisation has somewhere to live.
#[derive(Default)]
pub struct DContext {
    pub verify_checksum: bool,
}

impl DContext {
    pub fn new(verify_checksum: bool) -> Self {
        DContext { verify_checksum }
    }
}
