//! Ring-buffered multi-threaded compression engine (SPEC_FULL.md §4.7, §5).
//!
//! One reader thread slices the input into blocks and fills ring-buffer
//! slots; a fixed pool of worker threads compress filled slots in any order;
//! one writer thread drains processed slots strictly in sequence order. All
//! three thread kinds coordinate through a single shared [`Mutex`] plus three
//! purpose-specific [`Condvar`]s — `cond_reader` (a slot became `Free`),
//! `cond_worker` (a slot became `Filled`), and `cond_writer` (the
//! next-in-sequence slot became `Processed`) — rather than one condvar per
//! transition, so a thread only wakes for the transition it actually cares
//! about. The blocking-handoff shape generalizes a plain `Mutex<State>` +
//! `Condvar` job-queue idiom from "wait for job count" to "wait for a
//! specific slot's status".

use std::sync::{Condvar, Mutex};
use std::thread;

use crate::context::CContext;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum SlotStatus {
    Free,
    Filled,
    /// Claimed by a worker, compression in flight — distinct from `Filled`
    /// so a second worker scanning for work never double-claims the slot.
    InProgress,
    Processed,
}

struct Slot {
    status: SlotStatus,
    seq: u64,
    input: Vec<u8>,
    output: Vec<u8>,
}

struct RingState {
    slots: Vec<Slot>,
    /// Sequence number the reader will assign to the next slot it fills.
    next_fill_seq: u64,
    /// Sequence number the writer is waiting to flush next.
    next_write_seq: u64,
    /// Total number of blocks, once the reader has seen EOF (`None` until then).
    total_jobs: Option<u64>,
}

struct Ring {
    mutex: Mutex<RingState>,
    cond_reader: Condvar,
    cond_worker: Condvar,
    cond_writer: Condvar,
}

impl Ring {
    fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot { status: SlotStatus::Free, seq: 0, input: Vec::new(), output: Vec::new() })
            .collect();
        Ring {
            mutex: Mutex::new(RingState { slots, next_fill_seq: 0, next_write_seq: 0, total_jobs: None }),
            cond_reader: Condvar::new(),
            cond_worker: Condvar::new(),
            cond_writer: Condvar::new(),
        }
    }
}

/// Compress `input` with `num_workers` worker threads and the given `level`.
///
/// Blocks are laid out in `block_size`-byte chunks, each independently
/// compressed (§3.6 — blocks never reference one another), then reassembled
/// in the original order. Equivalent in effect to calling [`crate::codec::compress`]
/// on one thread, but spreads block encoding across `num_workers` threads.
pub fn compress_parallel(
    input: &[u8],
    level: u8,
    block_size: usize,
    checksum: bool,
    num_workers: usize,
) -> Vec<u8> {
    let num_workers = num_workers.max(1);
    let capacity = 4 * num_workers;
    let ring = Ring::new(capacity);

    let chunks: Vec<&[u8]> = if input.is_empty() { Vec::new() } else { input.chunks(block_size).collect() };
    let total = chunks.len() as u64;
    let output = Mutex::new((Vec::<u8>::new(), 0u32));

    thread::scope(|scope| {
        // Reader: fills slots in order, one per chunk, then records the total.
        scope.spawn(|| {
            for chunk in &chunks {
                let mut state = ring.mutex.lock().unwrap();
                let idx = (state.next_fill_seq % capacity as u64) as usize;
                while state.slots[idx].status != SlotStatus::Free {
                    state = ring.cond_reader.wait(state).unwrap();
                }
                state.slots[idx].input = chunk.to_vec();
                state.slots[idx].seq = state.next_fill_seq;
                state.slots[idx].status = SlotStatus::Filled;
                state.next_fill_seq += 1;
                ring.cond_worker.notify_all();
            }
            let mut state = ring.mutex.lock().unwrap();
            state.total_jobs = Some(total);
            ring.cond_worker.notify_all();
            ring.cond_writer.notify_all();
        });

        // Workers: claim any Filled slot, compress it, mark Processed.
        for _ in 0..num_workers {
            scope.spawn(|| {
                let mut ctx = CContext::new(level, checksum);
                loop {
                    let mut state = ring.mutex.lock().unwrap();
                    let idx = loop {
                        if let Some(i) = state.slots.iter().position(|s| s.status == SlotStatus::Filled) {
                            break Some(i);
                        }
                        let done = state.total_jobs.is_some()
                            && !state.slots.iter().any(|s| s.status == SlotStatus::Filled);
                        if done {
                            break None;
                        }
                        state = ring.cond_worker.wait(state).unwrap();
                    };
                    let Some(idx) = idx else { break };
                    state.slots[idx].status = SlotStatus::InProgress;
                    let input = std::mem::take(&mut state.slots[idx].input);
                    drop(state);

                    let record = ctx.compress_block(&input);

                    let mut state = ring.mutex.lock().unwrap();
                    state.slots[idx].output = record;
                    state.slots[idx].status = SlotStatus::Processed;
                    ring.cond_writer.notify_all();
                }
            });
        }

        // Writer: drains slots strictly in `next_write_seq` order, freeing
        // each slot back for the reader once flushed.
        scope.spawn(|| {
            let mut state = ring.mutex.lock().unwrap();
            loop {
                let idx = (state.next_write_seq % capacity as u64) as usize;
                while state.slots[idx].status != SlotStatus::Processed {
                    if state.total_jobs == Some(state.next_write_seq) {
                        return; // all blocks flushed
                    }
                    state = ring.cond_writer.wait(state).unwrap();
                }
                assert_eq!(state.slots[idx].seq, state.next_write_seq);
                let block_hash = crate::xxhash::hash32(&chunks[state.next_write_seq as usize]);
                let record = std::mem::take(&mut state.slots[idx].output);
                state.slots[idx].status = SlotStatus::Free;
                state.next_write_seq += 1;
                ring.cond_reader.notify_all();
                drop(state);

                let mut out = output.lock().unwrap();
                out.0.extend_from_slice(&record);
                out.1 = crate::format::fold_global_hash(out.1, block_hash);
                drop(out);

                state = ring.mutex.lock().unwrap();
            }
        });
    });

    let (out, global_hash) = output.into_inner().unwrap();

    let mut framed = Vec::with_capacity(crate::format::FILE_HEADER_SIZE + out.len() + 32);
    let mut header_buf = [0u8; crate::format::FILE_HEADER_SIZE];
    crate::format::FileHeader { block_size, has_checksum: checksum }.write(&mut header_buf);
    framed.extend_from_slice(&header_buf);
    framed.extend_from_slice(&out);
    framed.extend_from_slice(&crate::format::eof_block_header());
    let mut footer_buf = [0u8; crate::format::FILE_FOOTER_SIZE];
    crate::format::FileFooter { total_uncompressed: input.len() as u64, global_hash }.write(&mut footer_buf);
    framed.extend_from_slice(&footer_buf);
    framed
}
