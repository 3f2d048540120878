//! One-shot compress/decompress entry points (SPEC_FULL.md §4.5).
//!
//! | Rust function | Spec operation |
//! |---|---|
//! | [`compress_bound`] | §4.5 worst-case output size |
//! | [`compress`] | §4.5 one-shot compression |
//! | [`decompress`] | §4.5 one-shot decompression |
//! | [`get_decompressed_size`] | §4.5 footer-only size probe |
//!
//! The doc-comment table maps each function to the section of the on-disk
//! format it implements.

use crate::context::CContext;
use crate::error::{ZxcError, ZxcResult};
use crate::format::{
    eof_block_header, BlockHeader, FileFooter, FileHeader, BLOCK_HEADER_SIZE, CHECKSUM_SIZE,
    FILE_FOOTER_SIZE, FILE_HEADER_SIZE,
};
use crate::xxhash::hash32;

/// Worst-case compressed size for `input_size` bytes at `block_size`: every
/// block fails to compress and falls back to RAW, plus per-block and
/// per-file framing overhead.
pub fn compress_bound(input_size: usize, block_size: usize) -> usize {
    if block_size == 0 {
        return 0;
    }
    let n_blocks = input_size.div_ceil(block_size).max(1);
    let per_block = BLOCK_HEADER_SIZE.checked_add(CHECKSUM_SIZE).and_then(|s| s.checked_add(block_size));
    let Some(per_block) = per_block else { return 0 };
    let Some(blocks_total) = n_blocks.checked_mul(per_block) else { return 0 };

    FILE_HEADER_SIZE
        .checked_add(blocks_total)
        .and_then(|s| s.checked_add(BLOCK_HEADER_SIZE)) // EOF marker
        .and_then(|s| s.checked_add(FILE_FOOTER_SIZE))
        .unwrap_or(0)
}

/// Compress `data` in one call at the given `level` (1–5) and `block_size`,
/// with an optional per-block content checksum.
pub fn compress(data: &[u8], level: u8, block_size: usize, checksum: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(compress_bound(data.len(), block_size));
    let mut header_buf = [0u8; FILE_HEADER_SIZE];
    FileHeader { block_size, has_checksum: checksum }.write(&mut header_buf);
    out.extend_from_slice(&header_buf);

    let mut ctx = CContext::new(level, checksum);
    let mut global_hash = 0u32;
    for chunk in data.chunks(block_size) {
        out.extend_from_slice(&ctx.compress_block(chunk));
        global_hash = crate::format::fold_global_hash(global_hash, ctx.block_content_hash(chunk));
    }
    out.extend_from_slice(&eof_block_header());

    let mut footer_buf = [0u8; FILE_FOOTER_SIZE];
    FileFooter { total_uncompressed: data.len() as u64, global_hash }.write(&mut footer_buf);
    out.extend_from_slice(&footer_buf);
    out
}

/// Decompress a complete one-shot ZXC stream produced by [`compress`].
pub fn decompress(data: &[u8]) -> ZxcResult<Vec<u8>> {
    if data.len() < FILE_HEADER_SIZE + FILE_FOOTER_SIZE {
        return Err(ZxcError::SrcTooSmall);
    }
    let header = FileHeader::read(data)?;
    let footer = FileFooter::read(&data[data.len() - FILE_FOOTER_SIZE..])?;

    let mut cursor = FILE_HEADER_SIZE;
    let body_end = data.len() - FILE_FOOTER_SIZE;
    let mut out = Vec::new();
    let mut global_hash = 0u32;

    loop {
        if cursor + BLOCK_HEADER_SIZE > body_end {
            return Err(ZxcError::CorruptData);
        }
        let bh = BlockHeader::read(&data[cursor..cursor + BLOCK_HEADER_SIZE])?;
        cursor += BLOCK_HEADER_SIZE;

        if bh.block_type == crate::format::BlockType::Eof {
            break;
        }

        let comp_size = bh.comp_size as usize;
        if cursor + comp_size > body_end {
            return Err(ZxcError::SrcTooSmall);
        }
        let block_body = &data[cursor..cursor + comp_size];
        cursor += comp_size;

        let stored_checksum = if header.has_checksum {
            if cursor + CHECKSUM_SIZE > body_end {
                return Err(ZxcError::SrcTooSmall);
            }
            let c = u32::from_le_bytes(data[cursor..cursor + CHECKSUM_SIZE].try_into().unwrap());
            cursor += CHECKSUM_SIZE;
            Some(c)
        } else {
            None
        };

        let decoded = crate::block::decode_block(bh.block_type, block_body)?;
        if let Some(expected) = stored_checksum {
            if hash32(&decoded) != expected {
                return Err(ZxcError::BadChecksum);
            }
        }
        global_hash = crate::format::fold_global_hash(global_hash, hash32(&decoded));
        out.extend_from_slice(&decoded);
    }

    if out.len() as u64 != footer.total_uncompressed {
        return Err(ZxcError::CorruptData);
    }
    if global_hash != footer.global_hash {
        return Err(ZxcError::BadChecksum);
    }
    Ok(out)
}

/// Read the uncompressed size directly from a stream's footer without
/// decoding any block (§4.5's footer-only probe).
pub fn get_decompressed_size(data: &[u8]) -> ZxcResult<u64> {
    if data.len() < FILE_HEADER_SIZE + FILE_FOOTER_SIZE {
        return Err(ZxcError::SrcTooSmall);
    }
    FileHeader::read(data)?;
    let footer = FileFooter::read(&data[data.len() - FILE_FOOTER_SIZE..])?;
    Ok(footer.total_uncompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_multi_block_input() {
        let data: Vec<u8> = (0u32..50_000).map(|i| (i % 251) as u8).collect();
        let compressed = compress(&data, 3, 4096, true);
        let decompressed = decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn round_trips_empty_input() {
        let compressed = compress(&[], 3, 4096, true);
        let decompressed = decompress(&compressed).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn get_decompressed_size_matches_without_decoding() {
        let data = vec![9u8; 12_345];
        let compressed = compress(&data, 1, 4096, false);
        assert_eq!(get_decompressed_size(&compressed).unwrap(), data.len() as u64);
    }

    #[test]
    fn detects_corrupted_block_checksum() {
        let data = b"some reasonably compressible text text text text".to_vec();
        let mut compressed = compress(&data, 3, 4096, true);
        let tail_idx = compressed.len() - FILE_FOOTER_SIZE - 1;
        compressed[tail_idx] ^= 0xFF;
        let err = decompress(&compressed).unwrap_err();
        assert!(matches!(err, ZxcError::BadChecksum | ZxcError::CorruptData));
    }
}
