//! Header checksums: CRC-8 over the 8-byte block header, CRC-16 over the
//! 16-byte file header (SPEC_FULL.md §3.1–3.2, §4.1).
//!
//! The `crc` crate is pulled in rather than hand-rolling a lookup table,
//! matching how other packed binary-format crates reach for it (see
//! DESIGN.md).

use crc::{Algorithm, Crc, CRC_16_XMODEM, CRC_8_SMBUS};

static CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);
static CRC16: Crc<u16> = Crc::<u16>::new(&ALG_CRC16);

// `crc::CRC_16_XMODEM` is itself a `const Algorithm<u16>`; bound to a local
// name so both the digest and any future re-tuning stay in one place.
const ALG_CRC16: Algorithm<u16> = CRC_16_XMODEM;

/// CRC-8/SMBUS over `data`.
#[inline]
pub fn crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

/// CRC-16/XMODEM over `data`.
#[inline]
pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc8_is_deterministic_and_sensitive() {
        let a = crc8(b"hello world");
        let b = crc8(b"hello worlD");
        assert_ne!(a, b);
        assert_eq!(a, crc8(b"hello world"));
    }

    #[test]
    fn crc16_is_deterministic_and_sensitive() {
        let a = crc16(b"zxc file header");
        let b = crc16(b"zxc file headeR");
        assert_ne!(a, b);
        assert_eq!(a, crc16(b"zxc file header"));
    }
}
