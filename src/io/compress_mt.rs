//! Filename-level compression entry points, built atop [`crate::stream`].

use std::io::{self, BufWriter, Write};

use crate::cli::constants::display_level;
use crate::io::file_io::{open_dst_file, open_src_file, STDOUT_MARK};
use crate::io::prefs::Prefs;

/// Derive the destination filename for `src_filename` by appending the ZXC extension.
pub fn default_output_filename(src_filename: &str) -> String {
    format!("{}{}", src_filename, crate::cli::constants::ZXC_EXTENSION)
}

/// Compress `src_filename` into `dst_filename` (or a derived `.zxc` name when
/// `dst_filename` is `None`), honoring `prefs.nb_workers` for the block
/// encoder's worker pool.
pub fn compress_filename(src_filename: &str, dst_filename: Option<&str>, prefs: &Prefs) -> io::Result<u64> {
    let owned_dst;
    let dst_filename = match dst_filename {
        Some(d) => d,
        None => {
            owned_dst = default_output_filename(src_filename);
            &owned_dst
        }
    };

    let reader = open_src_file(src_filename)?;
    let dst = open_dst_file(dst_filename, prefs)?;
    let mut writer = BufWriter::new(dst);

    let n_threads =
        if prefs.nb_workers > 0 { prefs.nb_workers } else { crate::io::prefs::default_nb_workers() };

    let written = crate::stream::stream_compress(
        reader,
        &mut writer,
        prefs.level,
        prefs.block_size,
        prefs.checksum,
        n_threads,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    writer.flush()?;

    if display_level() >= 2 && dst_filename != STDOUT_MARK {
        eprintln!("Compressed {} bytes from {} into {}", written, src_filename, dst_filename);
    }

    if !prefs.keep_src_file && src_filename != crate::io::file_io::STDIN_MARK {
        let _ = std::fs::remove_file(src_filename);
    }

    Ok(written)
}

/// Compress every filename in `filenames` independently, stopping at the
/// first failure and returning its error. Each input produces its own
/// archive — ZXC's block format has no multi-file concatenation concept.
pub fn compress_multiple_filenames(
    filenames: &[String],
    dst_filename: Option<&str>,
    prefs: &Prefs,
) -> io::Result<()> {
    for name in filenames {
        let dst = if filenames.len() == 1 { dst_filename } else { None };
        compress_filename(name, dst, prefs)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_filename_appends_extension() {
        assert_eq!(default_output_filename("foo.txt"), "foo.txt.zxc");
    }

    #[test]
    fn compress_filename_round_trips_through_codec_decompress() {
        let dir = tempfile::tempdir().unwrap();
        let src_path = dir.path().join("input.txt");
        std::fs::write(&src_path, b"hello hello hello hello compress_mt test data".repeat(20)).unwrap();

        let mut prefs = Prefs::default();
        prefs.keep_src_file = true;
        prefs.overwrite = true;
        prefs.nb_workers = 1;

        let dst_path = dir.path().join("input.txt.zxc");
        compress_filename(src_path.to_str().unwrap(), Some(dst_path.to_str().unwrap()), &prefs).unwrap();

        let compressed = std::fs::read(&dst_path).unwrap();
        let decoded = crate::codec::decompress(&compressed).unwrap();
        assert_eq!(decoded, std::fs::read(&src_path).unwrap());
    }

    #[test]
    fn compress_filename_removes_source_unless_kept() {
        let dir = tempfile::tempdir().unwrap();
        let src_path = dir.path().join("input.txt");
        std::fs::write(&src_path, b"data to be removed after compression").unwrap();

        let mut prefs = Prefs::default();
        prefs.keep_src_file = false;
        prefs.overwrite = true;
        prefs.nb_workers = 1;

        let dst_path = dir.path().join("input.txt.zxc");
        compress_filename(src_path.to_str().unwrap(), Some(dst_path.to_str().unwrap()), &prefs).unwrap();
        assert!(!src_path.exists());
    }
}
