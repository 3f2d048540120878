//! On-disk layout: file header/footer, block header, and the NUM/GLO/GHI
//! sub-headers with their section descriptors (SPEC_FULL.md §3.1–3.3).
//!
//! Byte layout is cross-checked against `zxc_common.c`'s
//! `zxc_write_file_header`/`zxc_read_file_header`/`zxc_write_block_header`/
//! `zxc_write_num_header`/`zxc_write_glo_header_and_desc` in the original
//! source this spec was distilled from. Accessors are slice-based (not raw
//! pointer based), following `frame/header.rs`'s style since this layer
//! operates on owned buffers rather than streaming match-finder state.

use crate::bits::{read_le16, read_le32, read_le64, write_le16, write_le32, write_le64};
use crate::crc::{crc16, crc8};
use crate::error::{ZxcError, ZxcResult};

pub const MAGIC: u32 = 0x43585A31; // "1ZXC" read little-endian
pub const FORMAT_VERSION: u8 = 1;
pub const BLOCK_UNIT: usize = 4 * 1024;
pub const BLOCK_SIZE_DEFAULT: usize = 256 * 1024;

pub const FILE_HEADER_SIZE: usize = 16;
pub const BLOCK_HEADER_SIZE: usize = 8;
pub const CHECKSUM_SIZE: usize = 4;
pub const FILE_FOOTER_SIZE: usize = 12;

pub const FILE_FLAG_HAS_CHECKSUM: u8 = 0x01;

/// Block-type tags. Values are wire-stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockType {
    Raw = 1,
    Num = 2,
    Glo = 3,
    Ghi = 4,
    Eof = 0xFF,
}

impl BlockType {
    pub fn from_byte(b: u8) -> ZxcResult<Self> {
        match b {
            1 => Ok(BlockType::Raw),
            2 => Ok(BlockType::Num),
            3 => Ok(BlockType::Glo),
            4 => Ok(BlockType::Ghi),
            0xFF => Ok(BlockType::Eof),
            _ => Err(ZxcError::BadBlockType),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File header (16 B)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    pub block_size: usize,
    pub has_checksum: bool,
}

impl FileHeader {
    pub fn write(&self, out: &mut [u8; FILE_HEADER_SIZE]) {
        write_le32(&mut out[0..4], MAGIC);
        out[4] = FORMAT_VERSION;
        out[5] = (self.block_size / BLOCK_UNIT) as u8;
        out[6] = if self.has_checksum { FILE_FLAG_HAS_CHECKSUM } else { 0 };
        out[7..14].fill(0);
        out[14..16].fill(0);
        let crc = crc16(&out[..]);
        write_le16(&mut out[14..16], crc);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < FILE_HEADER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        if read_le32(&buf[0..4]) != MAGIC {
            return Err(ZxcError::BadMagic);
        }
        if buf[4] != FORMAT_VERSION {
            return Err(ZxcError::BadVersion);
        }
        let mut tmp = [0u8; FILE_HEADER_SIZE];
        tmp.copy_from_slice(&buf[..FILE_HEADER_SIZE]);
        let stored_crc = read_le16(&tmp[14..16]);
        tmp[14..16].fill(0);
        if crc16(&tmp) != stored_crc {
            return Err(ZxcError::BadHeader);
        }
        let unit_count = buf[5];
        let block_size = if unit_count == 0 { 64 } else { unit_count as usize } * BLOCK_UNIT;
        let has_checksum = buf[6] & FILE_FLAG_HAS_CHECKSUM != 0;
        Ok(FileHeader { block_size, has_checksum })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block header (8 B)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct BlockHeader {
    pub block_type: BlockType,
    pub comp_size: u32,
}

impl BlockHeader {
    pub fn write(&self, out: &mut [u8; BLOCK_HEADER_SIZE]) {
        out[0] = self.block_type as u8;
        out[1] = 0;
        out[2] = 0;
        write_le32(&mut out[3..7], self.comp_size);
        out[7] = 0;
        out[7] = crc8(&out[..]);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < BLOCK_HEADER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        let mut tmp = [0u8; BLOCK_HEADER_SIZE];
        tmp.copy_from_slice(&buf[..BLOCK_HEADER_SIZE]);
        let stored_crc = tmp[7];
        tmp[7] = 0;
        if crc8(&tmp) != stored_crc {
            return Err(ZxcError::BadHeader);
        }
        let block_type = BlockType::from_byte(buf[0])?;
        let comp_size = read_le32(&buf[3..7]);
        Ok(BlockHeader { block_type, comp_size })
    }
}

/// Build an EOF block header (`comp_size = 0`).
pub fn eof_block_header() -> [u8; BLOCK_HEADER_SIZE] {
    let mut out = [0u8; BLOCK_HEADER_SIZE];
    BlockHeader { block_type: BlockType::Eof, comp_size: 0 }.write(&mut out);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// File footer (12 B)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FileFooter {
    pub total_uncompressed: u64,
    pub global_hash: u32,
}

impl FileFooter {
    pub fn write(&self, out: &mut [u8; FILE_FOOTER_SIZE]) {
        write_le64(&mut out[0..8], self.total_uncompressed);
        write_le32(&mut out[8..12], self.global_hash);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < FILE_FOOTER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        Ok(FileFooter {
            total_uncompressed: read_le64(&buf[0..8]),
            global_hash: read_le32(&buf[8..12]),
        })
    }
}

/// Fold one block's content hash into the order-sensitive global hash
/// accumulator: `rotate_left_1(acc) XOR block_hash` (§3.6).
#[inline]
pub fn fold_global_hash(acc: u32, block_hash: u32) -> u32 {
    acc.rotate_left(1) ^ block_hash
}

// ─────────────────────────────────────────────────────────────────────────────
// NUM sub-header (16 B) + per-frame chunk header (16 B)
// ─────────────────────────────────────────────────────────────────────────────

pub const NUM_HEADER_SIZE: usize = 16;
pub const NUM_FRAME_HEADER_SIZE: usize = 16;
/// Values per NUM frame (§9 open-question resolution: fixed at 256).
pub const NUM_FRAME_SIZE: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct NumHeader {
    pub n_values: u64,
    pub frame_size: u16,
}

impl NumHeader {
    pub fn write(&self, out: &mut [u8; NUM_HEADER_SIZE]) {
        write_le64(&mut out[0..8], self.n_values);
        write_le16(&mut out[8..10], self.frame_size);
        out[10..16].fill(0);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < NUM_HEADER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        Ok(NumHeader { n_values: read_le64(&buf[0..8]), frame_size: read_le16(&buf[8..10]) })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NumFrameHeader {
    pub nvals: u16,
    pub bits: u16,
    pub psize: u32,
}

impl NumFrameHeader {
    pub fn write(&self, out: &mut [u8; NUM_FRAME_HEADER_SIZE]) {
        write_le16(&mut out[0..2], self.nvals);
        write_le16(&mut out[2..4], self.bits);
        out[4..10].fill(0);
        write_le32(&mut out[10..14], self.psize);
        out[14..16].fill(0);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < NUM_FRAME_HEADER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        let bits = read_le16(&buf[2..4]);
        if bits > 32 {
            return Err(ZxcError::CorruptData);
        }
        Ok(NumFrameHeader { nvals: read_le16(&buf[0..2]), bits, psize: read_le32(&buf[10..14]) })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GLO / GHI sub-headers (16 B) + section descriptors (8 B each)
// ─────────────────────────────────────────────────────────────────────────────

pub const GLO_HEADER_SIZE: usize = 16;
pub const GHI_HEADER_SIZE: usize = 16;
pub const SECTION_DESC_SIZE: usize = 8;
pub const GLO_SECTIONS: usize = 4; // literal, token, offset, extras
pub const GHI_SECTIONS: usize = 2; // literal, sequence

#[derive(Debug, Clone, Copy, Default)]
pub struct GloHeader {
    pub n_sequences: u32,
    pub n_literals: u32,
    pub enc_lit: u8,
    pub enc_off: u8,
    pub enc_litlen: u8,
    pub enc_mlen: u8,
}

impl GloHeader {
    pub fn write(&self, out: &mut [u8; GLO_HEADER_SIZE]) {
        write_le32(&mut out[0..4], self.n_sequences);
        write_le32(&mut out[4..8], self.n_literals);
        out[8] = self.enc_lit;
        out[9] = self.enc_off;
        out[10] = self.enc_litlen;
        out[11] = self.enc_mlen;
        out[12..16].fill(0);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < GLO_HEADER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        Ok(GloHeader {
            n_sequences: read_le32(&buf[0..4]),
            n_literals: read_le32(&buf[4..8]),
            enc_lit: buf[8],
            enc_off: buf[9],
            enc_litlen: buf[10],
            enc_mlen: buf[11],
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GhiHeader {
    pub n_sequences: u32,
    pub n_literals: u32,
}

impl GhiHeader {
    pub fn write(&self, out: &mut [u8; GHI_HEADER_SIZE]) {
        write_le32(&mut out[0..4], self.n_sequences);
        write_le32(&mut out[4..8], self.n_literals);
        out[8..16].fill(0);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < GHI_HEADER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        Ok(GhiHeader { n_sequences: read_le32(&buf[0..4]), n_literals: read_le32(&buf[4..8]) })
    }
}

/// One section descriptor: on-disk size in the low 32 bits, decoded size in
/// the high 32 bits (only differs from on-disk size for RLE-encoded literals).
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionDesc {
    pub on_disk_size: u32,
    pub decoded_size: u32,
}

impl SectionDesc {
    pub fn write(&self, out: &mut [u8; SECTION_DESC_SIZE]) {
        let sizes = (self.on_disk_size as u64) | ((self.decoded_size as u64) << 32);
        write_le64(out, sizes);
    }

    pub fn read(buf: &[u8]) -> ZxcResult<Self> {
        if buf.len() < SECTION_DESC_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        let sizes = read_le64(buf);
        Ok(SectionDesc { on_disk_size: sizes as u32, decoded_size: (sizes >> 32) as u32 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_header_round_trip() {
        let mut buf = [0u8; FILE_HEADER_SIZE];
        FileHeader { block_size: 256 * 1024, has_checksum: true }.write(&mut buf);
        let parsed = FileHeader::read(&buf).unwrap();
        assert_eq!(parsed.block_size, 256 * 1024);
        assert!(parsed.has_checksum);
    }

    #[test]
    fn file_header_zero_unit_defaults_to_64() {
        let mut buf = [0u8; FILE_HEADER_SIZE];
        FileHeader { block_size: 256 * 1024, has_checksum: false }.write(&mut buf);
        buf[5] = 0;
        let crc = crc16({
            let mut t = buf;
            t[14..16].fill(0);
            t
        }.as_slice());
        write_le16(&mut buf[14..16], crc);
        let parsed = FileHeader::read(&buf).unwrap();
        assert_eq!(parsed.block_size, 64 * BLOCK_UNIT);
    }

    #[test]
    fn file_header_rejects_bad_magic_and_crc() {
        let mut buf = [0u8; FILE_HEADER_SIZE];
        FileHeader { block_size: BLOCK_SIZE_DEFAULT, has_checksum: true }.write(&mut buf);
        let mut bad_magic = buf;
        bad_magic[0] ^= 0xFF;
        assert_eq!(FileHeader::read(&bad_magic).unwrap_err(), ZxcError::BadMagic);

        let mut bad_crc = buf;
        bad_crc[15] ^= 0xFF;
        assert_eq!(FileHeader::read(&bad_crc).unwrap_err(), ZxcError::BadHeader);
    }

    #[test]
    fn block_header_round_trip_and_crc() {
        let mut buf = [0u8; BLOCK_HEADER_SIZE];
        BlockHeader { block_type: BlockType::Glo, comp_size: 12345 }.write(&mut buf);
        let parsed = BlockHeader::read(&buf).unwrap();
        assert_eq!(parsed.block_type, BlockType::Glo);
        assert_eq!(parsed.comp_size, 12345);

        let mut corrupt = buf;
        corrupt[3] ^= 1;
        assert_eq!(BlockHeader::read(&corrupt).unwrap_err(), ZxcError::BadHeader);
    }

    #[test]
    fn eof_header_has_zero_comp_size() {
        let buf = eof_block_header();
        let parsed = BlockHeader::read(&buf).unwrap();
        assert_eq!(parsed.block_type, BlockType::Eof);
        assert_eq!(parsed.comp_size, 0);
    }

    #[test]
    fn footer_round_trip() {
        let mut buf = [0u8; FILE_FOOTER_SIZE];
        FileFooter { total_uncompressed: 9_999_999, global_hash: 0xABCD_1234 }.write(&mut buf);
        let parsed = FileFooter::read(&buf).unwrap();
        assert_eq!(parsed.total_uncompressed, 9_999_999);
        assert_eq!(parsed.global_hash, 0xABCD_1234);
    }

    #[test]
    fn global_hash_combiner_is_order_sensitive() {
        let h1 = fold_global_hash(fold_global_hash(0, 0x1111), 0x2222);
        let h2 = fold_global_hash(fold_global_hash(0, 0x2222), 0x1111);
        assert_ne!(h1, h2);
    }

    #[test]
    fn section_desc_round_trip() {
        let mut buf = [0u8; SECTION_DESC_SIZE];
        SectionDesc { on_disk_size: 42, decoded_size: 4096 }.write(&mut buf);
        let parsed = SectionDesc::read(&buf).unwrap();
        assert_eq!(parsed.on_disk_size, 42);
        assert_eq!(parsed.decoded_size, 4096);
    }
}
