//! Streaming compress/decompress over `Read`/`Write` (SPEC_FULL.md §4.7, §6).
//!
//! Unlike [`crate::codec::compress`]/[`crate::codec::decompress`], which
//! require the whole input resident in memory, the single-threaded path here
//! reads one block at a time so a caller can compress or decompress
//! arbitrarily large input against a bounded working set, built directly
//! atop [`crate::context`]. Passing `n_threads > 1` hands the whole input to
//! [`crate::pipeline::compress_parallel`] instead;
//! the ring-buffered engine there works over an in-memory slice rather than
//! a live `Read`, so the multi-threaded path first drains `reader` to a
//! buffer — a caller who needs bounded memory on very large input should
//! keep `n_threads == 1`.
//!
//! The `_ex` variants take an optional progress callback in place of the
//! language-neutral API's function-pointer-plus-user-data pair (§6), invoked
//! with cumulative `(bytes_processed, bytes_total_or_zero)` once per block,
//! the same way the filename-based entry points in [`crate::io`] thread an
//! optional notification sink through their own calls.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::context::{CContext, DContext};
use crate::error::{ZxcError, ZxcResult};
use crate::format::{
    eof_block_header, BlockHeader, BlockType, FileFooter, FileHeader, BLOCK_HEADER_SIZE,
    CHECKSUM_SIZE, FILE_FOOTER_SIZE, FILE_HEADER_SIZE,
};
use crate::xxhash::hash32;

type ProgressCb<'a> = Option<&'a mut dyn FnMut(u64, u64)>;

/// Compress `reader` to completion into `writer`, using `n_threads` worker
/// threads when greater than 1. Returns the number of uncompressed bytes consumed.
pub fn stream_compress<R: Read, W: Write>(
    reader: R,
    writer: W,
    level: u8,
    block_size: usize,
    checksum: bool,
    n_threads: usize,
) -> ZxcResult<u64> {
    stream_compress_ex(reader, writer, level, block_size, checksum, n_threads, None)
}

/// Same as [`stream_compress`], with an optional progress callback.
pub fn stream_compress_ex<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    level: u8,
    block_size: usize,
    checksum: bool,
    n_threads: usize,
    mut progress: ProgressCb,
) -> ZxcResult<u64> {
    if n_threads > 1 {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        let total = buf.len() as u64;
        let framed = crate::pipeline::compress_parallel(&buf, level, block_size, checksum, n_threads);
        writer.write_all(&framed)?;
        writer.flush()?;
        if let Some(cb) = progress.as_deref_mut() {
            cb(total, total);
        }
        return Ok(total);
    }

    let mut header_buf = [0u8; FILE_HEADER_SIZE];
    FileHeader { block_size, has_checksum: checksum }.write(&mut header_buf);
    writer.write_all(&header_buf)?;

    let mut ctx = CContext::new(level, checksum);
    let mut chunk = vec![0u8; block_size];
    let mut total: u64 = 0;
    let mut global_hash = 0u32;

    loop {
        let n = read_fill(&mut reader, &mut chunk)?;
        if n == 0 {
            break;
        }
        let block = &chunk[..n];
        writer.write_all(&ctx.compress_block(block))?;
        global_hash = crate::format::fold_global_hash(global_hash, ctx.block_content_hash(block));
        total += n as u64;
        if let Some(cb) = progress.as_deref_mut() {
            cb(total, 0);
        }
        if n < block_size {
            break;
        }
    }

    writer.write_all(&eof_block_header())?;
    let mut footer_buf = [0u8; FILE_FOOTER_SIZE];
    FileFooter { total_uncompressed: total, global_hash }.write(&mut footer_buf);
    writer.write_all(&footer_buf)?;
    writer.flush()?;
    Ok(total)
}

/// Decompress a complete ZXC stream from `reader` into `writer`, verifying
/// per-block and global checksums as it goes. `n_threads` is accepted for
/// symmetry with [`stream_compress`] but unused: per-block decode cost is
/// dominated by I/O, not the match-finder work that justifies parallel
/// compression, so decoding always runs on the caller's thread.
pub fn stream_decompress<R: Read, W: Write>(
    reader: R,
    writer: W,
    checksum: bool,
    n_threads: usize,
) -> ZxcResult<u64> {
    stream_decompress_ex(reader, writer, checksum, n_threads, None)
}

/// Same as [`stream_decompress`], with an optional progress callback.
pub fn stream_decompress_ex<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    checksum: bool,
    _n_threads: usize,
    mut progress: ProgressCb,
) -> ZxcResult<u64> {
    let mut header_buf = [0u8; FILE_HEADER_SIZE];
    reader.read_exact(&mut header_buf).map_err(io_to_zxc)?;
    let header = FileHeader::read(&header_buf)?;
    let dctx = DContext::new(checksum);

    let mut total: u64 = 0;
    let mut global_hash = 0u32;

    loop {
        let mut bh_buf = [0u8; BLOCK_HEADER_SIZE];
        reader.read_exact(&mut bh_buf).map_err(io_to_zxc)?;
        let bh = BlockHeader::read(&bh_buf)?;

        if bh.block_type == BlockType::Eof {
            break;
        }

        let mut body = vec![0u8; bh.comp_size as usize];
        reader.read_exact(&mut body).map_err(io_to_zxc)?;

        let stored_checksum = if header.has_checksum {
            let mut csum_buf = [0u8; CHECKSUM_SIZE];
            reader.read_exact(&mut csum_buf).map_err(io_to_zxc)?;
            Some(u32::from_le_bytes(csum_buf))
        } else {
            None
        };

        let decoded = crate::block::decode_block(bh.block_type, &body)?;
        if dctx.verify_checksum {
            if let Some(expected) = stored_checksum {
                if hash32(&decoded) != expected {
                    return Err(ZxcError::BadChecksum);
                }
            }
        }
        global_hash = crate::format::fold_global_hash(global_hash, hash32(&decoded));
        writer.write_all(&decoded)?;
        total += decoded.len() as u64;
        if let Some(cb) = progress.as_deref_mut() {
            cb(total, 0);
        }
    }

    let mut footer_buf = [0u8; FILE_FOOTER_SIZE];
    reader.read_exact(&mut footer_buf).map_err(io_to_zxc)?;
    let footer = FileFooter::read(&footer_buf)?;
    if total != footer.total_uncompressed {
        return Err(ZxcError::CorruptData);
    }
    if global_hash != footer.global_hash {
        return Err(ZxcError::BadChecksum);
    }
    writer.flush()?;
    Ok(total)
}

/// Read the uncompressed size from a seekable stream's footer, restoring
/// the reader's original position afterwards.
pub fn stream_get_decompressed_size<R: Read + Seek>(mut reader: R) -> ZxcResult<u64> {
    let start = reader.stream_position()?;
    reader.seek(SeekFrom::End(-(FILE_FOOTER_SIZE as i64))).map_err(io_to_zxc)?;
    let mut footer_buf = [0u8; FILE_FOOTER_SIZE];
    reader.read_exact(&mut footer_buf).map_err(io_to_zxc)?;
    let footer = FileFooter::read(&footer_buf)?;
    reader.seek(SeekFrom::Start(start))?;
    Ok(footer.total_uncompressed)
}

fn io_to_zxc(e: io::Error) -> ZxcError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        ZxcError::SrcTooSmall
    } else {
        ZxcError::Io(e.kind())
    }
}

/// Fill `buf` from `reader`, stopping short only at true EOF (unlike
/// `read_exact`, a short final chunk is not an error here).
fn read_fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_multi_block_stream() {
        let data: Vec<u8> = (0u32..40_000).map(|i| (i % 199) as u8).collect();
        let mut compressed = Vec::new();
        let written = stream_compress(Cursor::new(&data), &mut compressed, 3, 4096, true, 1).unwrap();
        assert_eq!(written, data.len() as u64);

        let mut restored = Vec::new();
        let read_back = stream_decompress(Cursor::new(&compressed), &mut restored, true, 1).unwrap();
        assert_eq!(read_back, data.len() as u64);
        assert_eq!(restored, data);
    }

    #[test]
    fn round_trips_empty_stream() {
        let mut compressed = Vec::new();
        stream_compress(Cursor::new(&[][..]), &mut compressed, 3, 4096, true, 1).unwrap();
        let mut restored = Vec::new();
        stream_decompress(Cursor::new(&compressed), &mut restored, true, 1).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn stream_output_matches_one_shot_codec() {
        let data = b"streaming streaming streaming streaming data data data".repeat(20);
        let mut compressed = Vec::new();
        stream_compress(Cursor::new(&data), &mut compressed, 2, 1024, true, 1).unwrap();
        let decoded = crate::codec::decompress(&compressed).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn multithreaded_stream_round_trips() {
        let data: Vec<u8> = (0u32..60_000).map(|i| (i % 137) as u8).collect();
        let mut compressed = Vec::new();
        stream_compress(Cursor::new(&data), &mut compressed, 3, 8192, true, 4).unwrap();
        let mut restored = Vec::new();
        stream_decompress(Cursor::new(&compressed), &mut restored, true, 1).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn progress_callback_reports_cumulative_bytes() {
        let data = vec![3u8; 20_000];
        let mut compressed = Vec::new();
        let mut seen = Vec::new();
        let mut cb = |done: u64, _total: u64| seen.push(done);
        stream_compress_ex(Cursor::new(&data), &mut compressed, 3, 4096, true, 1, Some(&mut cb)).unwrap();
        assert!(!seen.is_empty());
        assert_eq!(*seen.last().unwrap(), data.len() as u64);
    }

    #[test]
    fn get_decompressed_size_restores_position() {
        let data = vec![5u8; 9_000];
        let mut compressed = Vec::new();
        stream_compress(Cursor::new(&data), &mut compressed, 3, 4096, true, 1).unwrap();
        let mut cursor = Cursor::new(&compressed);
        cursor.set_position(4);
        let size = stream_get_decompressed_size(&mut cursor).unwrap();
        assert_eq!(size, data.len() as u64);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let data = vec![7u8; 10_000];
        let mut compressed = Vec::new();
        stream_compress(Cursor::new(&data), &mut compressed, 3, 2048, true, 1).unwrap();
        compressed.truncate(compressed.len() - 4);
        let mut restored = Vec::new();
        let err = stream_decompress(Cursor::new(&compressed), &mut restored, true, 1).unwrap_err();
        assert!(matches!(err, ZxcError::SrcTooSmall | ZxcError::CorruptData));
    }
}
