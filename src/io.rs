//! Filename-level I/O layer: opens files/sentinels, enforces overwrite and
//! display-level policy, and drives [`crate::stream`] underneath.

pub mod compress_mt;
pub mod decompress_dispatch;
pub mod file_io;
pub mod prefs;

pub use compress_mt::{compress_filename, compress_multiple_filenames};
pub use decompress_dispatch::{decompress_filename, decompress_multiple_filenames};
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};
pub use prefs::{default_nb_workers, set_notification_level, Prefs};
