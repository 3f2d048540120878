//! Thin wrapper around the `xxhash-rust` crate providing the 64-bit content
//! hash used throughout the block and global integrity model (SPEC_FULL.md §4.1).
//!
//! A one-line `pub use` plus a single one-shot free function, pointed at
//! `xxh3_64` since ZXC's content hash is 64-bit ("RapidHash family or
//! equivalent"; `xxh3_64` stands in here as the concrete instance already
//! available from the `xxhash-rust` dependency).

pub use xxhash_rust::xxh3::Xxh3 as ContentHasher;

/// One-shot 64-bit content hash.
#[inline]
pub fn hash64(data: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(data)
}

/// Truncate a 64-bit content hash to the 32-bit value stored per-block on
/// disk (§3.2's 4-byte block checksum).
#[inline]
pub fn hash32(data: &[u8]) -> u32 {
    hash64(data) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_and_sensitive() {
        assert_eq!(hash64(b"zxc"), hash64(b"zxc"));
        assert_ne!(hash64(b"zxc"), hash64(b"zxd"));
    }

    #[test]
    fn hash32_is_low_bits_of_hash64() {
        let h = hash64(b"sequence");
        assert_eq!(hash32(b"sequence"), h as u32);
    }
}
