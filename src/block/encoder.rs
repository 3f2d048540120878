//! GLO/GHI sequence encoding and block-format selection (SPEC_FULL.md §4.3).
//!
//! The literal/token/offset/extras section split and the run-length-encoded
//! literal fast path follow a token-emission shape familiar from other LZ77
//! codecs (a length nibble with a varint overflow escape for lengths that
//! overflow the nibble), generalized from a single interleaved byte stream
//! into GLO/GHI's four/three independent sections so each can be addressed
//! and (for literals) RLE'd on its own.

use crate::bits::write_varint;
use crate::block::match_finder::{level_params, MatchFinder};
use crate::block::num::{as_u32_stream, encode_num};
use crate::block::types::{HashTable, MINMATCH};
use crate::format::{GhiHeader, GloHeader, SectionDesc, GHI_HEADER_SIZE, GLO_HEADER_SIZE, SECTION_DESC_SIZE};

pub const SHORT_OFFSET_MAX: u32 = 0xFFFF;

/// Match-offset ceiling below which the 1-byte `enc_off=1` offset encoding
/// applies; offsets are stored as `actual - 1` so a `u8` spans 1..=256.
pub const TINY_OFFSET_MAX: u32 = 256;

/// RLE-encode a literal byte run using the 7-bit token scheme (§4.3): runs
/// of a repeated byte of length >= 4 become `(0x80 | (len-4)), byte`;
/// non-run spans become `(len-1), bytes...` with `len` <= 128.
fn rle_encode_literals(data: &[u8]) -> Vec<u8> {
    fn run_len(data: &[u8], pos: usize) -> usize {
        let b = data[pos];
        let mut n = 1;
        while pos + n < data.len() && data[pos + n] == b {
            n += 1;
        }
        n
    }

    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let run = run_len(data, i);
        if run >= 4 {
            let take = run.min(4 + 0x7F);
            out.push(0x80 | ((take - 4) as u8));
            out.push(data[i]);
            i += take;
        } else {
            let start = i;
            let mut j = i;
            while j < data.len() && (j - start) < 128 && run_len(data, j) < 4 {
                j += 1;
            }
            let len = j - start;
            out.push((len - 1) as u8);
            out.extend_from_slice(&data[start..j]);
            i = j;
        }
    }
    out
}

/// One parsed (literal run, match) sequence. The final sequence in a block
/// may have `match_len == 0` (trailing literal-only run).
#[derive(Clone, Copy, Debug)]
struct Sequence {
    lit_len: u32,
    match_len: u32,
    offset: u32,
}

/// Parse `data` into a sequence list using the chained-hash match finder at
/// the given compression `level`, with simple one-step lazy matching.
fn parse_sequences(data: &[u8], level: u8) -> Vec<Sequence> {
    let params = level_params(level);
    let mut table = HashTable::new();
    let mut mf = MatchFinder::new(data, &mut table);
    let mut seqs = Vec::new();
    let mut lit_start = 0usize;
    let mut pos = 0usize;

    while pos < data.len() {
        let Some(m) = mf.find_match(pos, params) else {
            pos += 1;
            continue;
        };

        // Lazy matching: if the next position yields a strictly longer match,
        // emit one extra literal and take that one instead.
        if params.lazy_margin > 0 && pos + 1 < data.len() {
            if let Some(next) = mf.find_match(pos + 1, params) {
                if next.len > m.len + params.lazy_margin {
                    pos += 1;
                    continue;
                }
            }
        }

        seqs.push(Sequence {
            lit_len: (pos - lit_start) as u32,
            match_len: m.len,
            offset: m.offset,
        });
        let match_end = pos + m.len as usize;
        for p in (pos + 1)..match_end {
            mf.skip(p);
        }
        pos = match_end;
        lit_start = pos;
    }

    seqs.push(Sequence { lit_len: (data.len() - lit_start) as u32, match_len: 0, offset: 0 });
    seqs
}

fn max_offset(seqs: &[Sequence]) -> u32 {
    seqs.iter().map(|s| s.offset).max().unwrap_or(0)
}

fn write_literals(data: &[u8], seqs: &[Sequence]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut cursor = 0usize;
    for s in seqs {
        out.extend_from_slice(&data[cursor..cursor + s.lit_len as usize]);
        cursor += s.lit_len as usize + s.match_len as usize;
    }
    out
}

/// Encode a GLO (short-offset) block: a one-byte token per sequence
/// (`high nibble = min(lit_len,15)`, `low nibble = min(match_len-MINMATCH,15)`),
/// overflow lengths in `extras` as varints, 1- or 2-byte offsets depending on
/// `enc_off`, and the literal bytes (raw or RLE-compressed per `enc_lit`).
fn encode_glo(data: &[u8], seqs: &[Sequence]) -> Vec<u8> {
    let enc_off: u8 = if max_offset(seqs) <= TINY_OFFSET_MAX { 1 } else { 0 };

    let mut tokens = Vec::with_capacity(seqs.len());
    let mut offsets = Vec::new();
    let mut extras = Vec::new();

    for s in seqs {
        let lit_nib = s.lit_len.min(15);
        // 0 means "no match" (the trailing literal-only sequence); a real
        // match of length MINMATCH encodes as 1, so the field is never
        // ambiguous between "no match" and "shortest possible match".
        let mlen_code = if s.match_len == 0 { 0 } else { (s.match_len - MINMATCH as u32 + 1).min(15) };
        tokens.push(((lit_nib as u8) << 4) | mlen_code as u8);
        if lit_nib == 15 {
            write_varint(&mut extras, s.lit_len - 15);
        }
        if s.match_len > 0 && mlen_code == 15 {
            write_varint(&mut extras, s.match_len - MINMATCH as u32 + 1 - 15);
        }
        if s.match_len > 0 {
            if enc_off == 1 {
                offsets.push((s.offset - 1) as u8);
            } else {
                offsets.extend_from_slice(&(s.offset as u16).to_le_bytes());
            }
        }
    }
    let literals = write_literals(data, seqs);
    let rle_literals = rle_encode_literals(&literals);
    let enc_lit: u8 = if rle_literals.len() < literals.len() { 1 } else { 0 };
    let (literal_section, literal_decoded_size): (&[u8], u32) = if enc_lit == 1 {
        (&rle_literals, literals.len() as u32)
    } else {
        (&literals, literals.len() as u32)
    };

    let header = GloHeader {
        n_sequences: seqs.len() as u32,
        n_literals: literals.len() as u32,
        enc_lit,
        enc_off,
        enc_litlen: 0,
        enc_mlen: 0,
    };
    assemble(
        |buf| {
            let mut h = [0u8; GLO_HEADER_SIZE];
            header.write(&mut h);
            buf.extend_from_slice(&h);
        },
        &[
            (literal_section, literal_decoded_size),
            (&tokens, tokens.len() as u32),
            (&offsets, offsets.len() as u32),
            (&extras, extras.len() as u32),
        ],
    )
}

/// Encode a GHI (long-match) block: sequences packed as
/// `(lit_len varint, match_len varint, offset u32 LE)`, followed by the raw
/// literal bytes. Used when any match offset exceeds [`SHORT_OFFSET_MAX`].
fn encode_ghi(data: &[u8], seqs: &[Sequence]) -> Vec<u8> {
    let mut sequence_bytes = Vec::new();
    for s in seqs {
        write_varint(&mut sequence_bytes, s.lit_len);
        write_varint(&mut sequence_bytes, s.match_len);
        sequence_bytes.extend_from_slice(&s.offset.to_le_bytes());
    }
    let literals = write_literals(data, seqs);

    let header = GhiHeader { n_sequences: seqs.len() as u32, n_literals: literals.len() as u32 };
    assemble(
        |buf| {
            let mut h = [0u8; GHI_HEADER_SIZE];
            header.write(&mut h);
            buf.extend_from_slice(&h);
        },
        &[(literals.as_slice(), literals.len() as u32), (sequence_bytes.as_slice(), sequence_bytes.len() as u32)],
    )
}

/// Lay out `header` followed by one [`SectionDesc`] per section and then the
/// section bytes themselves, in the order given. Each section pairs its
/// on-disk bytes with the decoded size a section-local transform (e.g. the
/// GLO literal-stream RLE) expands them to; sections with no such transform
/// pass `bytes.len()` for both.
fn assemble(write_header: impl FnOnce(&mut Vec<u8>), sections: &[(&[u8], u32)]) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&mut out);
    for (s, decoded_size) in sections {
        let mut d = [0u8; SECTION_DESC_SIZE];
        SectionDesc { on_disk_size: s.len() as u32, decoded_size: *decoded_size }.write(&mut d);
        out.extend_from_slice(&d);
    }
    for (s, _) in sections {
        out.extend_from_slice(s);
    }
    out
}

/// Candidate encodings considered by [`select_encoding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Raw,
    Num,
    Glo,
    Ghi,
}

/// Try every applicable encoding and return the smallest, alongside its
/// encoded bytes (§4.5: block encoder picks whichever representation is
/// actually smaller, falling back to RAW when nothing wins).
pub fn select_encoding(data: &[u8], level: u8) -> (Encoding, Vec<u8>) {
    let mut best = (Encoding::Raw, data.to_vec());

    if let Some(values) = as_u32_stream(data) {
        let num = encode_num(&values);
        if num.len() < best.1.len() {
            best = (Encoding::Num, num);
        }
    }

    let seqs = parse_sequences(data, level);
    let has_any_match = seqs.iter().any(|s| s.match_len > 0);
    if has_any_match {
        if max_offset(&seqs) <= SHORT_OFFSET_MAX {
            let glo = encode_glo(data, &seqs);
            if glo.len() < best.1.len() {
                best = (Encoding::Glo, glo);
            }
        } else {
            let ghi = encode_ghi(data, &seqs);
            if ghi.len() < best.1.len() {
                best = (Encoding::Ghi, ghi);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_glo_for_short_offset_repetition() {
        let data = b"The quick brown fox. The quick brown fox. The quick brown fox.".repeat(4);
        let (enc, bytes) = select_encoding(&data, 3);
        assert_eq!(enc, Encoding::Glo);
        assert!(bytes.len() < data.len());
    }

    #[test]
    fn falls_back_to_raw_for_incompressible_data() {
        let data: Vec<u8> = (0u32..300).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
        let (enc, bytes) = select_encoding(&data, 3);
        if enc == Encoding::Raw {
            assert_eq!(bytes, data);
        }
    }

    #[test]
    fn selects_num_for_numeric_stream() {
        let values: Vec<u32> = (0..2000u32).collect();
        let data = crate::block::num::u32_stream_to_bytes(&values);
        let (enc, bytes) = select_encoding(&data, 3);
        assert_eq!(enc, Encoding::Num);
        assert!(bytes.len() < data.len());
    }

    #[test]
    fn small_offset_repetition_selects_8bit_offset_encoding() {
        let data = b"ABCDE".repeat(40);
        let seqs = parse_sequences(&data, 3);
        assert!(max_offset(&seqs) <= TINY_OFFSET_MAX);
        let glo = encode_glo(&data, &seqs);
        let header = GloHeader::read(&glo[..GLO_HEADER_SIZE]).unwrap();
        assert_eq!(header.enc_off, 1);
    }

    #[test]
    fn large_offset_repetition_selects_16bit_offset_encoding() {
        let period = 300;
        let mut data = vec![0u8; period];
        for (i, b) in data.iter_mut().enumerate() {
            *b = (i % 7) as u8;
        }
        data = data.repeat(6);
        let seqs = parse_sequences(&data, 3);
        assert!(max_offset(&seqs) > TINY_OFFSET_MAX);
        let glo = encode_glo(&data, &seqs);
        let header = GloHeader::read(&glo[..GLO_HEADER_SIZE]).unwrap();
        assert_eq!(header.enc_off, 0);
    }
}
