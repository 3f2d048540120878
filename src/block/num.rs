//! NUM block encoding: ZigZag-delta bit-packed `u32` frames (SPEC_FULL.md §3.5, §4.3 item 1, §4.4).
//!
//! Built on `bits.rs`'s `BitWriter`/`BitReader`/ZigZag helpers for the
//! packing primitives themselves; the frame-at-a-time structure (fixed-size
//! chunks, one small header per chunk recording the bit width actually used)
//! follows a "probe, then commit to the cheapest representation" shape,
//! applied per-frame instead of per-block.

use crate::bits::{zigzag_decode, zigzag_encode, BitReader, BitWriter};
use crate::error::{ZxcError, ZxcResult};
use crate::format::{NumFrameHeader, NumHeader, NUM_FRAME_HEADER_SIZE, NUM_FRAME_SIZE, NUM_HEADER_SIZE};

/// Reinterpret `data` as a stream of little-endian `u32` values. Returns
/// `None` if the length isn't a multiple of 4 — NUM never applies to
/// non-numeric data.
pub fn as_u32_stream(data: &[u8]) -> Option<Vec<u32>> {
    if data.len() % 4 != 0 {
        return None;
    }
    Some(data.chunks_exact(4).map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect())
}

fn bits_needed(v: u32) -> u32 {
    32 - v.leading_zeros()
}

/// Encode `values` as a NUM section: a [`NumHeader`] followed by one
/// bit-packed frame per `NUM_FRAME_SIZE` values. Each frame ZigZag-deltas
/// against the running previous value (continuous across frame boundaries)
/// and packs at the minimum bit width that fits every delta in the frame.
pub fn encode_num(values: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut header_buf = [0u8; NUM_HEADER_SIZE];
    NumHeader { n_values: values.len() as u64, frame_size: NUM_FRAME_SIZE as u16 }.write(&mut header_buf);
    out.extend_from_slice(&header_buf);

    let mut prev: i64 = 0;
    for frame in values.chunks(NUM_FRAME_SIZE) {
        let deltas: Vec<u32> = frame
            .iter()
            .map(|&v| {
                let d = v as i64 - prev;
                prev = v as i64;
                zigzag_encode(d as i32)
            })
            .collect();
        let bits = deltas.iter().fold(0u32, |acc, &d| acc.max(bits_needed(d)));
        let mut bw = BitWriter::new();
        for &d in &deltas {
            bw.put(d, bits);
        }
        let packed = bw.finish();

        let mut fh_buf = [0u8; NUM_FRAME_HEADER_SIZE];
        NumFrameHeader { nvals: frame.len() as u16, bits: bits as u16, psize: packed.len() as u32 }
            .write(&mut fh_buf);
        out.extend_from_slice(&fh_buf);
        out.extend_from_slice(&packed);
    }
    out
}

/// Decode a NUM section back into its `u32` values.
pub fn decode_num(data: &[u8]) -> ZxcResult<Vec<u32>> {
    if data.len() < NUM_HEADER_SIZE {
        return Err(ZxcError::SrcTooSmall);
    }
    let header = NumHeader::read(&data[..NUM_HEADER_SIZE])?;
    let mut cursor = NUM_HEADER_SIZE;
    let mut values = Vec::with_capacity(header.n_values as usize);
    let mut prev: i64 = 0;

    while values.len() < header.n_values as usize {
        if data.len() < cursor + NUM_FRAME_HEADER_SIZE {
            return Err(ZxcError::SrcTooSmall);
        }
        let fh = NumFrameHeader::read(&data[cursor..cursor + NUM_FRAME_HEADER_SIZE])?;
        cursor += NUM_FRAME_HEADER_SIZE;
        let psize = fh.psize as usize;
        if data.len() < cursor + psize {
            return Err(ZxcError::SrcTooSmall);
        }
        let mut br = BitReader::new(&data[cursor..cursor + psize]);
        for _ in 0..fh.nvals {
            let d = br.consume(fh.bits as u32);
            let delta = zigzag_decode(d) as i64;
            prev += delta;
            if !(0..=u32::MAX as i64).contains(&prev) {
                return Err(ZxcError::CorruptData);
            }
            values.push(prev as u32);
        }
        cursor += psize;
    }
    Ok(values)
}

/// Serialize decoded `u32` values back to their little-endian byte stream.
pub fn u32_stream_to_bytes(values: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 4);
    for &v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}
