//! Filename-level decompression entry points, built atop [`crate::stream`].

use std::io::{self, BufWriter, Write};

use crate::cli::constants::display_level;
use crate::io::file_io::{open_dst_file, open_src_file, STDOUT_MARK};
use crate::io::prefs::Prefs;

/// Derive the destination filename for `src_filename` by stripping a
/// trailing `.zxc` suffix. Returns `None` when `src_filename` has no such
/// suffix, matching the ambiguity a caller must resolve (e.g. by requiring
/// an explicit `-o`).
pub fn default_output_filename(src_filename: &str) -> Option<String> {
    src_filename.strip_suffix(crate::cli::constants::ZXC_EXTENSION).map(str::to_owned)
}

/// Decompress `src_filename` into `dst_filename` (or a name derived by
/// stripping `.zxc` when `dst_filename` is `None`).
pub fn decompress_filename(src_filename: &str, dst_filename: Option<&str>, prefs: &Prefs) -> io::Result<u64> {
    let owned_dst;
    let dst_filename = match dst_filename {
        Some(d) => d,
        None => match default_output_filename(src_filename) {
            Some(d) => {
                owned_dst = d;
                &owned_dst
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{}: unable to determine destination name (missing .zxc suffix)", src_filename),
                ));
            }
        },
    };

    let reader = open_src_file(src_filename)?;

    if prefs.test_mode {
        let mut sink = io::sink();
        let read = crate::stream::stream_decompress(reader, &mut sink, prefs.checksum, 1)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        if display_level() >= 2 {
            eprintln!("{}: OK ({} bytes)", src_filename, read);
        }
        return Ok(read);
    }

    let dst = open_dst_file(dst_filename, prefs)?;
    let mut writer = BufWriter::new(dst);
    let written = crate::stream::stream_decompress(reader, &mut writer, prefs.checksum, 1)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    writer.flush()?;

    if display_level() >= 2 && dst_filename != STDOUT_MARK {
        eprintln!("Decompressed {} bytes from {} into {}", written, src_filename, dst_filename);
    }

    if !prefs.keep_src_file && src_filename != crate::io::file_io::STDIN_MARK {
        let _ = std::fs::remove_file(src_filename);
    }

    Ok(written)
}

/// Decompress every filename in `filenames` independently, deriving each
/// destination name by stripping `.zxc`, stopping at the first failure.
pub fn decompress_multiple_filenames(
    filenames: &[String],
    dst_filename: Option<&str>,
    prefs: &Prefs,
) -> io::Result<()> {
    for name in filenames {
        let dst = if filenames.len() == 1 { dst_filename } else { None };
        decompress_filename(name, dst, prefs)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::compress_mt::compress_filename;

    #[test]
    fn default_output_filename_strips_extension() {
        assert_eq!(default_output_filename("foo.txt.zxc"), Some("foo.txt".to_owned()));
        assert_eq!(default_output_filename("foo.txt"), None);
    }

    #[test]
    fn decompress_filename_round_trips_with_compress_filename() {
        let dir = tempfile::tempdir().unwrap();
        let src_path = dir.path().join("input.txt");
        let original = b"round trip through the filename-level entry points".repeat(30);
        std::fs::write(&src_path, &original).unwrap();

        let mut prefs = Prefs::default();
        prefs.keep_src_file = true;
        prefs.overwrite = true;
        prefs.nb_workers = 1;

        let archive_path = dir.path().join("input.txt.zxc");
        compress_filename(src_path.to_str().unwrap(), Some(archive_path.to_str().unwrap()), &prefs).unwrap();

        let out_path = dir.path().join("restored.txt");
        decompress_filename(archive_path.to_str().unwrap(), Some(out_path.to_str().unwrap()), &prefs).unwrap();

        assert_eq!(std::fs::read(&out_path).unwrap(), original);
    }

    #[test]
    fn test_mode_does_not_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let src_path = dir.path().join("input.txt");
        std::fs::write(&src_path, b"verify-only data, should not be written anywhere").unwrap();

        let mut prefs = Prefs::default();
        prefs.keep_src_file = true;
        prefs.overwrite = true;
        prefs.nb_workers = 1;

        let archive_path = dir.path().join("input.txt.zxc");
        compress_filename(src_path.to_str().unwrap(), Some(archive_path.to_str().unwrap()), &prefs).unwrap();

        prefs.test_mode = true;
        let read = decompress_filename(archive_path.to_str().unwrap(), None, &prefs).unwrap();
        assert!(read > 0);
        assert!(!dir.path().join("input.txt").exists() || dir.path().join("input.txt") == src_path);
    }

    #[test]
    fn missing_suffix_without_explicit_dst_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let src_path = dir.path().join("archive.bin");
        std::fs::write(&src_path, b"not a real archive, just exercising the suffix check").unwrap();
        let prefs = Prefs::default();
        let result = decompress_filename(src_path.to_str().unwrap(), None, &prefs);
        assert!(result.is_err());
    }
}
