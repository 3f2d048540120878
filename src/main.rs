//! Binary entry point for the `zxc` command-line tool.
//!
//! 1. [`zxc::cli::args::Cli::parse_args`] parses argv via `clap`, exiting
//!    early on `--help`/`--version`/a malformed invocation.
//! 2. [`Cli::into_parsed`] lowers the result into a [`ParsedArgs`].
//! 3. [`run`] resolves output filenames, applies display-level policy, and
//!    dispatches to the filename-level I/O entry points.

use std::io::IsTerminal;
use std::path::Path;

use zxc::cli::args::{resolve_op_mode, Cli, ParsedArgs};
use zxc::cli::constants::{display_level, set_display_level};
use zxc::cli::op_mode::OpMode;
use zxc::io::{
    compress_filename, compress_multiple_filenames, decompress_filename,
    decompress_multiple_filenames, set_notification_level, STDIN_MARK, STDOUT_MARK,
};
use zxc::util::create_file_list;

fn run(args: ParsedArgs) -> i32 {
    let mut prefs = args.prefs;
    prefs.level = args.level;
    let mut op_mode = args.op_mode;
    let force_stdout = args.force_stdout;
    let mut in_file_names = args.in_file_names;
    let mut output_filename = args.output_filename;

    let expand_paths: Vec<&Path> = in_file_names.iter().map(Path::new).collect();
    match create_file_list(&expand_paths) {
        Ok(expanded) => {
            in_file_names = expanded.into_iter().map(|p| p.to_string_lossy().into_owned()).collect();
        }
        Err(e) => {
            zxc::displaylevel!(1, "error expanding input paths: {}\n", e);
            return 1;
        }
    }

    set_display_level(args.display_level);

    zxc::displaylevel!(
        3,
        "*** {} v{} {}-bit {}, by {} ***\n",
        zxc::cli::constants::COMPRESSOR_NAME,
        zxc::ZXC_VERSION_STRING,
        (std::mem::size_of::<*const ()>() * 8),
        zxc::cli::constants::IO_MT,
        zxc::cli::constants::AUTHOR
    );

    if !zxc::config::MULTITHREAD && prefs.nb_workers > 1 {
        zxc::displaylevel!(2, "warning: this executable doesn't support multithreading \n");
    }

    let multiple_inputs = in_file_names.len() > 1;
    let input_filename: String = if multiple_inputs {
        in_file_names.first().cloned().unwrap_or_default()
    } else {
        in_file_names.pop().unwrap_or_else(|| STDIN_MARK.to_owned())
    };

    if input_filename == STDIN_MARK && std::io::stdin().is_terminal() {
        zxc::displaylevel!(1, "refusing to read from a console\n");
        std::process::exit(1);
    }

    if input_filename == STDIN_MARK && output_filename.is_none() {
        output_filename = Some(STDOUT_MARK.to_owned());
    }

    if op_mode == OpMode::Test {
        prefs.test_mode = true;
        output_filename = Some(zxc::io::NUL_MARK.to_owned());
        op_mode = OpMode::Decompress;
    }

    if !multiple_inputs && output_filename.is_none() {
        op_mode = resolve_op_mode(op_mode, &input_filename);
        output_filename = match op_mode {
            OpMode::Compress => {
                let out = zxc::io::compress_mt::default_output_filename(&input_filename);
                zxc::displaylevel!(2, "Compressed filename will be : {} \n", out);
                Some(out)
            }
            OpMode::Decompress => match zxc::io::decompress_dispatch::default_output_filename(&input_filename) {
                Some(out) => {
                    zxc::displaylevel!(2, "Decoding file {} \n", out);
                    Some(out)
                }
                None => {
                    zxc::displaylevel!(1, "Cannot determine an output filename \n");
                    std::process::exit(1);
                }
            },
            _ => None,
        };
    }

    let output_filename = output_filename.unwrap_or_else(|| "*\\dummy^!//".to_owned());

    if output_filename == STDOUT_MARK && std::io::stdout().is_terminal() && !force_stdout {
        zxc::displaylevel!(1, "refusing to write to console without -c \n");
        std::process::exit(1);
    }

    if output_filename == STDOUT_MARK && display_level() == 2 {
        set_display_level(1);
    }
    if multiple_inputs && display_level() == 2 {
        set_display_level(1);
    }

    if op_mode == OpMode::Auto {
        op_mode = resolve_op_mode(op_mode, &input_filename);
    }

    set_notification_level(display_level());

    let result = if op_mode == OpMode::Decompress {
        if multiple_inputs {
            decompress_multiple_filenames(&in_file_names, Some(output_filename.as_str()), &prefs)
        } else {
            decompress_filename(&input_filename, Some(output_filename.as_str()), &prefs).map(|_| ())
        }
    } else {
        #[cfg(feature = "multithread")]
        {
            let mut nb = prefs.nb_workers;
            if nb != 1 {
                if nb == 0 {
                    nb = zxc::io::default_nb_workers();
                }
                let max = zxc::config::NB_WORKERS_MAX;
                if nb > max {
                    zxc::displaylevel!(3, "Requested {} threads too large => automatically reduced to {} \n", nb, max);
                    nb = max;
                } else {
                    zxc::displaylevel!(3, "Using {} threads for compression \n", nb);
                }
            }
            prefs.nb_workers = nb;
        }

        if multiple_inputs {
            compress_multiple_filenames(&in_file_names, Some(output_filename.as_str()), &prefs)
        } else {
            compress_filename(&input_filename, Some(output_filename.as_str()), &prefs).map(|_| ())
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            zxc::displaylevel!(1, "zxc: {}\n", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse_args();
    let args = cli.into_parsed();
    let exit_code = run(args);
    std::process::exit(exit_code);
}
