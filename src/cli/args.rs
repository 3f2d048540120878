//! Command-line argument parsing for the `zxc` binary, built on `clap`'s
//! derive API rather than a hand-rolled parser.
//!
//! [`Cli::parse_args`] (wrapping `clap::Parser::parse`) is the entry point
//! `main.rs` uses; [`Cli::into_parsed`] lowers the raw `clap` struct into a
//! [`ParsedArgs`] that the rest of the CLI driver consumes.

use clap::Parser;

use crate::cli::constants::ZXC_EXTENSION;
use crate::cli::op_mode::OpMode;
use crate::io::prefs::Prefs;

#[derive(Parser, Debug)]
#[command(
    name = "zxc",
    version = crate::ZXC_VERSION_STRING,
    about = "A general-purpose lossless LZ77-family byte-stream compressor",
    long_about = None,
)]
pub struct Cli {
    /// Input file(s). Omit, or pass `-`, to read standard input.
    pub files: Vec<String>,

    /// Compress the input (default action when the input has no `.zxc` suffix).
    #[arg(short = 'z', long, conflicts_with = "decompress")]
    pub compress: bool,

    /// Decompress the input (default action when the input has a `.zxc` suffix).
    #[arg(short = 'd', long)]
    pub decompress: bool,

    /// Write output to FILE instead of deriving a name from the input.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<String>,

    /// Force output to stdout.
    #[arg(short = 'c', long = "stdout")]
    pub to_stdout: bool,

    /// Keep (do not delete) the input file after a successful operation.
    #[arg(short = 'k', long)]
    pub keep: bool,

    /// Overwrite an existing output file without prompting.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Number of worker threads to use for compression (0 = auto-detect).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Compression level, 1 (fastest) to 9 (smallest). Overrides -1..-9.
    #[arg(short = 'L', long, value_name = "N")]
    pub level: Option<u8>,

    #[arg(short = '1', hide = true)]
    pub level1: bool,
    #[arg(short = '2', hide = true)]
    pub level2: bool,
    #[arg(short = '3', hide = true)]
    pub level3: bool,
    #[arg(short = '4', hide = true)]
    pub level4: bool,
    #[arg(short = '5', hide = true)]
    pub level5: bool,
    #[arg(short = '6', hide = true)]
    pub level6: bool,
    #[arg(short = '7', hide = true)]
    pub level7: bool,
    #[arg(short = '8', hide = true)]
    pub level8: bool,
    #[arg(short = '9', hide = true)]
    pub level9: bool,

    /// Block size in bytes for the streaming block format.
    #[arg(long, value_name = "BYTES")]
    pub block_size: Option<usize>,

    /// Disable the per-block and global xxh3-32 checksums.
    #[arg(long)]
    pub no_checksum: bool,

    /// Test the integrity of a compressed file without writing output.
    #[arg(long, conflicts_with_all = ["compress", "decompress"])]
    pub test: bool,

    /// Increase verbosity (repeatable).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Options and filenames produced by parsing argv, lowered from [`Cli`].
#[derive(Debug)]
pub struct ParsedArgs {
    pub prefs: Prefs,
    pub op_mode: OpMode,
    pub level: u8,
    pub force_stdout: bool,
    pub keep_src_file: bool,
    pub in_file_names: Vec<String>,
    pub output_filename: Option<String>,
    pub display_level: u32,
}

impl Cli {
    /// Parse `std::env::args()` into a [`Cli`], exiting the process (via
    /// `clap`'s own `--help`/`--version`/error handling) on a bad invocation.
    pub fn parse_args() -> Cli {
        Cli::parse()
    }

    /// Parse an explicit argument list, for unit testing.
    pub fn parse_args_from<I, T>(args: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args)
    }

    /// Lower the raw `clap` struct into the [`ParsedArgs`] the dispatch layer consumes.
    pub fn into_parsed(self) -> ParsedArgs {
        let mut prefs = Prefs::default();
        prefs.overwrite = self.force;
        prefs.keep_src_file = self.keep;
        prefs.checksum = !self.no_checksum;
        if self.threads > 0 {
            prefs.nb_workers = self.threads;
        }
        if let Some(bs) = self.block_size {
            prefs.block_size = bs;
        }

        let level = self.level.unwrap_or_else(|| {
            [
                (self.level1, 1u8),
                (self.level2, 2),
                (self.level3, 3),
                (self.level4, 4),
                (self.level5, 5),
                (self.level6, 6),
                (self.level7, 7),
                (self.level8, 8),
                (self.level9, 9),
            ]
            .into_iter()
            .find_map(|(set, n)| set.then_some(n))
            .unwrap_or(crate::config::CLEVEL_DEFAULT)
        });

        let op_mode = if self.test {
            OpMode::Test
        } else if self.decompress {
            OpMode::Decompress
        } else if self.compress {
            OpMode::Compress
        } else {
            OpMode::Auto
        };

        let display_level = if self.quiet {
            0
        } else {
            2 + self.verbose as u32
        };

        let output_filename = if self.to_stdout {
            Some(crate::io::file_io::STDOUT_MARK.to_owned())
        } else {
            self.output
        };

        ParsedArgs {
            prefs,
            op_mode,
            level,
            force_stdout: self.to_stdout,
            keep_src_file: self.keep,
            in_file_names: self.files,
            output_filename,
            display_level,
        }
    }
}

/// Resolve the effective operation mode for a single input filename,
/// falling back to extension sniffing when the user passed neither `-z` nor `-d`.
pub fn resolve_op_mode(op_mode: OpMode, filename: &str) -> OpMode {
    match op_mode {
        OpMode::Auto => {
            if filename.ends_with(ZXC_EXTENSION) {
                OpMode::Decompress
            } else {
                OpMode::Compress
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ParsedArgs {
        Cli::parse_args_from(std::iter::once("zxc").chain(args.iter().copied())).unwrap().into_parsed()
    }

    #[test]
    fn defaults_to_auto_mode() {
        let parsed = parse(&["input.zxc"]);
        assert_eq!(parsed.op_mode, OpMode::Auto);
        assert_eq!(parsed.in_file_names, vec!["input.zxc"]);
    }

    #[test]
    fn explicit_decompress_flag() {
        let parsed = parse(&["-d", "input.zxc"]);
        assert_eq!(parsed.op_mode, OpMode::Decompress);
    }

    #[test]
    fn explicit_compress_flag() {
        let parsed = parse(&["-z", "input.txt"]);
        assert_eq!(parsed.op_mode, OpMode::Compress);
    }

    #[test]
    fn numeric_level_flag_sets_level() {
        let parsed = parse(&["-7", "input.txt"]);
        assert_eq!(parsed.level, 7);
    }

    #[test]
    fn explicit_level_flag_overrides_numeric_shortcuts() {
        let parsed = parse(&["--level", "9", "input.txt"]);
        assert_eq!(parsed.level, 9);
    }

    #[test]
    fn stdout_flag_sets_output_marker() {
        let parsed = parse(&["-c", "input.txt"]);
        assert_eq!(parsed.output_filename.as_deref(), Some(crate::io::file_io::STDOUT_MARK));
    }

    #[test]
    fn no_checksum_flag_disables_checksum() {
        let parsed = parse(&["--no-checksum", "input.txt"]);
        assert!(!parsed.prefs.checksum);
    }

    #[test]
    fn quiet_flag_sets_display_level_zero() {
        let parsed = parse(&["-q", "input.txt"]);
        assert_eq!(parsed.display_level, 0);
    }

    #[test]
    fn verbose_flags_increase_display_level() {
        let parsed = parse(&["-v", "-v", "input.txt"]);
        assert_eq!(parsed.display_level, 4);
    }

    #[test]
    fn resolve_op_mode_sniffs_extension() {
        assert_eq!(resolve_op_mode(OpMode::Auto, "archive.zxc"), OpMode::Decompress);
        assert_eq!(resolve_op_mode(OpMode::Auto, "archive.txt"), OpMode::Compress);
    }

    #[test]
    fn resolve_op_mode_respects_explicit_choice() {
        assert_eq!(resolve_op_mode(OpMode::Compress, "archive.zxc"), OpMode::Compress);
    }
}
