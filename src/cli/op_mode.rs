//! Operation-mode selection and environment-variable overrides for the CLI.

use crate::cli::constants::{display_level, ZXC_EXTENSION};

/// Default compression level.
pub const ZXC_CLEVEL_DEFAULT: u8 = crate::config::CLEVEL_DEFAULT;
/// Default number of worker threads (0 = auto).
pub const ZXC_NBWORKERS_DEFAULT: usize = 0;

/// What the CLI driver should do with each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Determined from the filename extension.
    Auto,
    Compress,
    Decompress,
    /// Verify a compressed file's checksums without writing output.
    Test,
}

/// Auto-determine operation mode from `filename`'s extension.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if filename.ends_with(ZXC_EXTENSION) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

/// Read the number of worker threads from the `ZXC_NBWORKERS` environment variable.
pub fn init_nb_workers() -> usize {
    const ENV_NBTHREADS: &str = "ZXC_NBWORKERS";
    if let Ok(env) = std::env::var(ENV_NBTHREADS) {
        if let Ok(val) = env.trim().parse::<usize>() {
            return val;
        }
        if display_level() >= 2 {
            eprintln!(
                "Ignore environment variable setting {}={}: not a valid unsigned value ",
                ENV_NBTHREADS, env
            );
        }
    }
    ZXC_NBWORKERS_DEFAULT
}

/// Read the compression level from the `ZXC_CLEVEL` environment variable.
pub fn init_c_level() -> u8 {
    const ENV_CLEVEL: &str = "ZXC_CLEVEL";
    if let Ok(env) = std::env::var(ENV_CLEVEL) {
        if let Ok(val) = env.trim().parse::<u8>() {
            return val;
        }
        if display_level() >= 2 {
            eprintln!(
                "Ignore environment variable setting {}={}: not a valid unsigned value ",
                ENV_CLEVEL, env
            );
        }
    }
    ZXC_CLEVEL_DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_mode_has_four_variants() {
        let variants = [OpMode::Auto, OpMode::Compress, OpMode::Decompress, OpMode::Test];
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn determine_op_mode_zxc_extension_decompresses() {
        assert_eq!(determine_op_mode("foo.zxc"), OpMode::Decompress);
    }

    #[test]
    fn determine_op_mode_other_extension_compresses() {
        assert_eq!(determine_op_mode("foo.txt"), OpMode::Compress);
    }

    #[test]
    fn determine_op_mode_no_extension_compresses() {
        assert_eq!(determine_op_mode("archive"), OpMode::Compress);
    }

    #[test]
    fn init_nb_workers_env_var_numeric() {
        std::env::set_var("ZXC_NBWORKERS", "2");
        let result = init_nb_workers();
        std::env::remove_var("ZXC_NBWORKERS");
        assert_eq!(result, 2);
    }

    #[test]
    fn init_nb_workers_env_var_unset_returns_default() {
        std::env::remove_var("ZXC_NBWORKERS");
        assert_eq!(init_nb_workers(), ZXC_NBWORKERS_DEFAULT);
    }

    #[test]
    fn init_nb_workers_env_var_nonnumeric_returns_default() {
        std::env::set_var("ZXC_NBWORKERS", "auto");
        let result = init_nb_workers();
        std::env::remove_var("ZXC_NBWORKERS");
        assert_eq!(result, ZXC_NBWORKERS_DEFAULT);
    }

    #[test]
    fn init_c_level_env_var_numeric() {
        std::env::set_var("ZXC_CLEVEL", "9");
        let result = init_c_level();
        std::env::remove_var("ZXC_CLEVEL");
        assert_eq!(result, 9);
    }

    #[test]
    fn init_c_level_env_var_unset_returns_default() {
        std::env::remove_var("ZXC_CLEVEL");
        assert_eq!(init_c_level(), ZXC_CLEVEL_DEFAULT);
    }

    #[test]
    fn init_c_level_env_var_nonnumeric_returns_default() {
        std::env::set_var("ZXC_CLEVEL", "fast");
        let result = init_c_level();
        std::env::remove_var("ZXC_CLEVEL");
        assert_eq!(result, ZXC_CLEVEL_DEFAULT);
    }
}
