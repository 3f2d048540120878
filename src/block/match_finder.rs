//! Chained-hash LZ77 match finder for GLO/GHI encoding (SPEC_FULL.md §4.2).
//!
//! Hashes a 4-byte window, walks a delta chain of prior occurrences, and
//! keeps the longest candidate within `max_chain` links — simplified for a
//! single independent block with no dictionary or external context: no
//! backward match extension beyond the block start, no pattern-analysis or
//! chain-swap optimisations, since GLO/GHI blocks never look outside their
//! own buffer. Per-level tuning is one row of parameters per compression
//! level.

use crate::block::types::{self as bt, HashTable, MINMATCH};

/// No prior occurrence recorded for this chain slot.
const NO_PREV: u32 = u32::MAX;

/// Per-level search tuning: one row of parameters per compression level.
#[derive(Clone, Copy)]
pub struct LevelParams {
    /// Maximum hash-chain links to follow per search.
    pub max_chain: u32,
    /// Match length at which the search stops early ("good enough").
    pub nice_len: u32,
    /// Lazy matching: also try position `pos + 1` and keep it only if it
    /// beats the match at `pos` by more than this margin.
    pub lazy_margin: u32,
}

/// Levels 1–5: deeper chains and larger lazy margins at higher levels
/// trade speed for ratio.
pub const LEVELS: [LevelParams; 5] = [
    LevelParams { max_chain: 4, nice_len: 32, lazy_margin: 0 },
    LevelParams { max_chain: 8, nice_len: 48, lazy_margin: 1 },
    LevelParams { max_chain: 16, nice_len: 64, lazy_margin: 1 },
    LevelParams { max_chain: 32, nice_len: 96, lazy_margin: 2 },
    LevelParams { max_chain: 64, nice_len: 128, lazy_margin: 2 },
];

pub fn level_params(level: u8) -> LevelParams {
    let idx = level.saturating_sub(1).min(4) as usize;
    LEVELS[idx]
}

/// A single located back-reference: starts `len` bytes at `pos - offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub offset: u32,
    pub len: u32,
}

/// Match finder state scoped to one block. The hash table is epoch-tagged so
/// the owning worker context can reuse it across many blocks (`new_epoch`);
/// the chain array is block-local since its indices are block-relative.
pub struct MatchFinder<'a> {
    data: &'a [u8],
    table: &'a mut HashTable,
    chain: Vec<u32>,
}

impl<'a> MatchFinder<'a> {
    pub fn new(data: &'a [u8], table: &'a mut HashTable) -> Self {
        table.new_epoch();
        MatchFinder { data, table, chain: vec![NO_PREV; data.len()] }
    }

    /// Record position `pos` in the hash table, chaining it behind whatever
    /// was previously there under the same hash.
    fn insert(&mut self, pos: usize) {
        if pos + 4 > self.data.len() {
            return;
        }
        let h = unsafe { bt::hash_position(self.data.as_ptr().add(pos)) };
        let prev = self.table.get(h).unwrap_or(NO_PREV);
        self.chain[pos] = prev;
        self.table.put(h, pos as u32);
    }

    /// Search for the longest match starting at `pos`, inserting `pos` itself
    /// into the tables as a side effect (so later positions can reference it).
    pub fn find_match(&mut self, pos: usize, params: LevelParams) -> Option<Match> {
        if pos + MINMATCH > self.data.len() {
            self.insert(pos);
            return None;
        }
        let h = unsafe { bt::hash_position(self.data.as_ptr().add(pos)) };
        let mut candidate = self.table.get(h);
        self.insert(pos);

        let mut best: Option<Match> = None;
        let mut attempts = params.max_chain;
        while let Some(cand_pos) = candidate {
            if attempts == 0 {
                break;
            }
            attempts -= 1;
            let len = unsafe {
                bt::count(
                    self.data.as_ptr().add(pos),
                    self.data.as_ptr().add(cand_pos as usize),
                    self.data.as_ptr().add(self.data.len()),
                )
            };
            if len >= MINMATCH as u32 {
                let offset = pos as u32 - cand_pos;
                let better = match best {
                    Some(m) => len > m.len,
                    None => true,
                };
                if better {
                    best = Some(Match { offset, len });
                    if len >= params.nice_len {
                        break;
                    }
                }
            }
            candidate = if self.chain[cand_pos as usize] == NO_PREV {
                None
            } else {
                Some(self.chain[cand_pos as usize])
            };
        }
        best
    }

    /// Insert-only, for positions the caller chose to emit as literals
    /// without searching (e.g. the remaining bytes of a run we already found
    /// a match for).
    pub fn skip(&mut self, pos: usize) {
        self.insert(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_exact_repeated_pattern() {
        let data = b"abcdabcdabcdabcd";
        let mut table = HashTable::new();
        let mut mf = MatchFinder::new(data, &mut table);
        mf.find_match(0, level_params(3));
        let m = mf.find_match(4, level_params(3)).expect("expected a match at position 4");
        assert_eq!(m.offset, 4);
        assert!(m.len >= 4);
    }

    #[test]
    fn no_match_on_unique_bytes() {
        let data = b"abcdefghijklmnop";
        let mut table = HashTable::new();
        let mut mf = MatchFinder::new(data, &mut table);
        for i in 0..data.len() {
            assert!(mf.find_match(i, level_params(1)).is_none());
        }
    }

    #[test]
    fn level_params_scale_with_level() {
        assert!(level_params(5).max_chain > level_params(1).max_chain);
        assert_eq!(level_params(0).max_chain, level_params(1).max_chain);
        assert_eq!(level_params(9).max_chain, level_params(5).max_chain);
    }
}
