//! Compression/decompression preferences and display-level globals shared
//! by the filename-level entry points in [`crate::io`].

use crate::timefn::{clock_span_ns, DurationNs, TimeT};

// ---------------------------------------------------------------------------
// Display / notification globals
// ---------------------------------------------------------------------------

/// Refresh interval for progress updates (200 ms in nanoseconds).
pub const REFRESH_RATE_NS: DurationNs = 200_000_000;

/// Print a message at or above `level`, matching the CLI's own display-level gate.
pub fn display_level(level: u32, msg: &str) {
    if crate::cli::constants::display_level() >= level {
        eprintln!("{}", msg);
    }
}

/// Print final elapsed wall-clock time and throughput after an operation.
pub fn final_time_display(time_start: TimeT, size: u64) {
    let elapsed_ns = clock_span_ns(time_start);
    let elapsed_s = elapsed_ns as f64 / 1_000_000_000.0;
    if elapsed_s > 0.0 {
        let mb_per_s = (size as f64 / (1 << 20) as f64) / elapsed_s;
        display_level(4, &format!("Done in {:.2} s ; {:.1} MB/s", elapsed_s, mb_per_s));
    } else {
        display_level(4, "Done");
    }
}

/// Number of worker threads to use when the user hasn't specified one,
/// gated by the `multithread` Cargo feature.
pub fn default_nb_workers() -> usize {
    if crate::config::MULTITHREAD {
        crate::util::count_cores()
    } else {
        1
    }
}

/// Compression/decompression/IO preferences, lowered from CLI args or set
/// directly by a library caller driving the filename-level entry points.
#[derive(Debug, Clone)]
pub struct Prefs {
    /// Compression level, 1 (fastest) to [`crate::config::CLEVEL_MAX`].
    pub level: u8,
    /// Block size, in bytes, for the streaming block format.
    pub block_size: usize,
    /// Whether to compute and verify per-block + global xxh3-32 checksums.
    pub checksum: bool,
    /// Overwrite an existing destination file without prompting.
    pub overwrite: bool,
    /// Verify integrity only; do not write a decompressed/compressed output.
    pub test_mode: bool,
    /// Keep the source file after a successful operation (default: remove it,
    /// mirroring `gzip`'s default of replacing the input in place).
    pub keep_src_file: bool,
    /// Number of worker threads for compression (0 = auto via [`default_nb_workers`]).
    pub nb_workers: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            level: crate::config::CLEVEL_DEFAULT,
            block_size: crate::config::BLOCK_SIZE_DEFAULT,
            checksum: crate::config::CHECKSUM_DEFAULT,
            overwrite: false,
            test_mode: false,
            keep_src_file: false,
            nb_workers: default_nb_workers(),
        }
    }
}

impl Prefs {
    pub fn set_level(&mut self, level: u8) -> u8 {
        self.level = level.clamp(1, crate::config::CLEVEL_MAX);
        self.level
    }

    pub fn set_block_size(&mut self, block_size: usize) -> usize {
        self.block_size = block_size.max(1);
        self.block_size
    }

    pub fn set_checksum(&mut self, enabled: bool) -> bool {
        self.checksum = enabled;
        self.checksum
    }

    pub fn set_overwrite(&mut self, enabled: bool) -> bool {
        self.overwrite = enabled;
        self.overwrite
    }

    pub fn set_test_mode(&mut self, enabled: bool) -> bool {
        self.test_mode = enabled;
        self.test_mode
    }

    pub fn set_keep_src_file(&mut self, enabled: bool) -> bool {
        self.keep_src_file = enabled;
        self.keep_src_file
    }

    /// Sets the number of worker threads, clamped to `[1, NB_WORKERS_MAX]`.
    pub fn set_nb_workers(&mut self, n: usize) -> usize {
        self.nb_workers = n.max(1).min(crate::config::NB_WORKERS_MAX);
        self.nb_workers
    }
}

/// Set the global CLI display level, returning the previous value.
pub fn set_notification_level(level: u32) -> u32 {
    let prev = crate::cli::constants::display_level();
    crate::cli::constants::set_display_level(level);
    prev
}
