//! Runtime dispatch scaffold for CPU-feature-specialized block encoding (SPEC_FULL.md §4.6).
//!
//! A function pointer behind an `AtomicPtr`, published once under `Release`
//! ordering and read under `Acquire` on every call, so detection runs
//! exactly once regardless of how many threads call in concurrently. This
//! build ships only the scalar implementation — there is no
//! `target_feature`-gated SIMD variant to select yet — but the indirection
//! stays in place so one can be slotted in behind the same atomic swap later
//! without touching call sites.

use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Once;

use crate::block::encoder::{select_encoding, Encoding};

type SelectEncodingFn = fn(&[u8], u8) -> (Encoding, Vec<u8>);

static SELECT_ENCODING_PTR: AtomicPtr<()> = AtomicPtr::new(std::ptr::null_mut());
static INIT: Once = Once::new();

fn detect_and_publish() {
    // A real build would probe `is_x86_feature_detected!("avx2")` and similar
    // here and publish a matching specialized function. Only the scalar path
    // exists in this crate today.
    let f: SelectEncodingFn = select_encoding;
    SELECT_ENCODING_PTR.store(f as *mut (), Ordering::Release);
}

/// Returns the block encoder appropriate for this CPU, detecting it once and
/// caching the result in a process-wide atomic.
pub fn dispatch_select_encoding() -> SelectEncodingFn {
    INIT.call_once(detect_and_publish);
    let ptr = SELECT_ENCODING_PTR.load(Ordering::Acquire);
    // SAFETY: only ever stored from `detect_and_publish`, which writes a
    // valid `SelectEncodingFn` cast through `*mut ()`.
    unsafe { std::mem::transmute::<*mut (), SelectEncodingFn>(ptr) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_resolves_to_a_callable_encoder() {
        let f = dispatch_select_encoding();
        let (_, bytes) = f(b"hello hello hello hello", 3);
        assert!(!bytes.is_empty());
    }

    #[test]
    fn repeated_calls_are_stable() {
        let a = dispatch_select_encoding() as usize;
        let b = dispatch_select_encoding() as usize;
        assert_eq!(a, b);
    }
}
