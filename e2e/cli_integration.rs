//! Black-box tests of the `zxc` binary via `std::process::Command`.
//!
//! Covers argument parsing, compress/decompress dispatch, exit codes, and
//! test mode.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `zxc` binary produced by Cargo.
fn zxc_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_zxc") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("zxc");
    p
}

fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, ZXC!\n".repeat(341);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

#[test]
fn compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let compressed = dir.path().join("output.zxc");
    let roundtrip = dir.path().join("roundtrip.txt");

    let status = Command::new(zxc_bin())
        .args(["-f", input.to_str().unwrap(), "-o", compressed.to_str().unwrap()])
        .status()
        .expect("failed to run zxc compress");
    assert!(status.success(), "compress step should exit 0");
    assert!(compressed.exists(), "compressed file should exist");

    let status = Command::new(zxc_bin())
        .args(["-d", "-f", compressed.to_str().unwrap(), "-o", roundtrip.to_str().unwrap()])
        .status()
        .expect("failed to run zxc decompress");
    assert!(status.success(), "decompress step should exit 0");

    let recovered = fs::read(&roundtrip).unwrap();
    assert_eq!(original, recovered, "roundtrip output must match original");
}

#[test]
fn version_flag_reports_crate_version() {
    let output = Command::new(zxc_bin())
        .arg("--version")
        .output()
        .expect("failed to run zxc --version");

    assert!(output.status.success(), "--version should exit 0; status: {}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "--version stdout should contain the crate version; got: {stdout}"
    );
}

#[test]
fn help_flag_mentions_usage() {
    let output = Command::new(zxc_bin())
        .arg("--help")
        .output()
        .expect("failed to run zxc --help");

    assert!(output.status.success(), "--help should exit 0; status: {}", output.status);
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.to_lowercase().contains("usage"),
        "--help output should contain 'usage'; got: {combined}"
    );
}

#[test]
fn keep_flag_preserves_source_file() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("kept_output.zxc");

    let status = Command::new(zxc_bin())
        .args(["-k", "-f", input.to_str().unwrap(), "-o", compressed.to_str().unwrap()])
        .status()
        .expect("failed to run zxc -k");

    assert!(status.success(), "-k compress should exit 0");
    assert!(input.exists(), "source file must still exist after -k compress");
    assert!(compressed.exists(), "compressed output must exist");
}

#[test]
fn default_mode_removes_source_file() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("removed_output.zxc");

    let status = Command::new(zxc_bin())
        .args(["-f", input.to_str().unwrap(), "-o", compressed.to_str().unwrap()])
        .status()
        .expect("failed to run zxc compress");

    assert!(status.success());
    assert!(!input.exists(), "source file should be removed without -k");
}

#[test]
fn test_mode_accepts_valid_archive() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("valid_test.zxc");

    Command::new(zxc_bin())
        .args(["-f", input.to_str().unwrap(), "-o", compressed.to_str().unwrap()])
        .status()
        .expect("compress step failed");

    let status = Command::new(zxc_bin())
        .args(["--test", compressed.to_str().unwrap()])
        .status()
        .expect("failed to run zxc --test on a valid file");

    assert!(status.success(), "--test on a valid archive should exit 0");
}

#[test]
fn test_mode_rejects_corrupt_archive() {
    let dir = TempDir::new().unwrap();
    let corrupt = dir.path().join("corrupt.zxc");
    fs::write(&corrupt, [0xFFu8; 64]).unwrap();

    let status = Command::new(zxc_bin())
        .args(["--test", corrupt.to_str().unwrap()])
        .status()
        .expect("failed to run zxc --test on a corrupt file");

    assert!(!status.success(), "--test on a corrupt archive should exit non-zero");
}

#[test]
fn nonexistent_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.zxc");
    let status = Command::new(zxc_bin())
        .args(["/nonexistent_path_abc123_zxctest", "-o", out.to_str().unwrap()])
        .status()
        .expect("failed to run zxc with nonexistent input");

    assert!(!status.success(), "zxc with nonexistent input should exit non-zero");
}

#[test]
fn explicit_level_flag_is_accepted() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("leveled.zxc");

    let status = Command::new(zxc_bin())
        .args(["-L", "5", "-f", input.to_str().unwrap(), "-o", compressed.to_str().unwrap()])
        .status()
        .expect("failed to run zxc -L 5");

    assert!(status.success(), "-L 5 compress should exit 0");
    assert!(compressed.exists());
}
