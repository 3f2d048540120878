//! Compile-time configuration constants (SPEC_FULL.md §10.3).
//!
//! Binary-mode toggling, sparse-file mode, and large-file-offset concerns
//! are not needed here: 64-bit sizes and file I/O are handled natively by
//! Rust's standard library, and ZXC has no sparse-file feature.

/// Default compression level. Levels run 1 (fastest) to 5 (smallest);
/// [`crate::block::match_finder::level_params`] clamps anything outside that range.
pub const CLEVEL_DEFAULT: u8 = 1;
/// Highest compression level accepted by the encoder.
pub const CLEVEL_MAX: u8 = 5;

/// Whether multi-threaded compression is compiled in by default.
pub const MULTITHREAD: bool = cfg!(target_os = "windows") || cfg!(feature = "multithread");

/// Default number of worker threads (0 = auto-detect via `num_cpus`).
pub const NB_WORKERS_DEFAULT: usize = 0;

/// Maximum number of compression worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

/// Default block size: 256 KiB.
pub const BLOCK_SIZE_DEFAULT: usize = 256 * 1024;

/// Default per-block/global checksum setting.
pub const CHECKSUM_DEFAULT: bool = true;
