//! File list construction with recursive directory expansion.
//!
//! Given a mixed list of file and directory paths, [`create_file_list`] returns
//! a flat `Vec<PathBuf>` containing only regular files. Directories are walked
//! recursively using the [`walkdir`] crate.
//!
//! **Symlink handling**: Symlinks are never followed during directory traversal.
//! `walkdir` runs with its default `follow_links(false)` setting, so symlink
//! entries report a symlink `file_type()` rather than the target's type and are
//! excluded from the result. This prevents infinite loops from cyclic symlinks.
//! A symlink passed directly as a non-directory input is forwarded as-is.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expand a mixed list of file and directory paths into a flat list of regular files.
///
/// - Paths that are already regular files are forwarded unchanged.
/// - Directories are walked recursively; only entries whose
///   `file_type().is_file()` returns `true` are included. Symlinks are excluded
///   regardless of target type — `walkdir` uses `follow_links(false)`.
/// - If any directory entry cannot be read, the walk is aborted and an
///   `io::Error` is returned. Callers that prefer best-effort enumeration
///   should handle or filter errors before calling this function.
///
/// Returns an empty `Vec` when `inputs` is empty or contains no regular files.
/// Callers should check `result.is_empty()` if a non-empty list is required.
pub fn create_file_list(inputs: &[&Path]) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        if input.is_dir() {
            // Walk the directory tree without following symlinks. Symlinks to
            // directories are not recursed into; symlink entries are not
            // is_file() so they are excluded from the result.
            for entry in WalkDir::new(input) {
                let entry = entry.map_err(|e| {
                    e.io_error()
                        .map(|io| io::Error::new(io.kind(), io.to_string()))
                        .unwrap_or_else(|| io::Error::other(e.to_string()))
                })?;
                if entry.file_type().is_file() {
                    result.push(entry.into_path());
                }
            }
        } else {
            // Non-directory inputs are forwarded unchanged; no existence or
            // type check is performed on them.
            result.push(input.to_path_buf());
        }
    }
    Ok(result)
}
