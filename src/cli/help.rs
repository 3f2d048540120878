//! Small interactive-prompt helpers. Usage/help text itself is generated by
//! `clap` (see [`crate::cli::args`]) rather than hand-formatted here.

use std::io::{self, Read, Write};

/// Print `msg` to stderr (at display level 1) then exit with code 1.
pub fn error_out(msg: &str) -> ! {
    if crate::cli::constants::display_level() >= 1 {
        eprintln!("{} ", msg);
    }
    std::process::exit(1);
}

/// Print a prompt and block until the user presses Enter.
///
/// Used before an interactive overwrite confirmation so the user has a
/// chance to read the prompt on terminals that close immediately on exit.
pub fn wait_enter() {
    eprint!("Press enter to continue...\n");
    let _ = io::stderr().flush();
    let mut one_byte = [0u8; 1];
    let _ = io::stdin().read(&mut one_byte);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_out_is_callable() {
        // error_out exits the process, so it cannot be called directly in a
        // unit test; this just documents intent and keeps the import live.
        let _ = error_out as fn(&str) -> !;
    }
}
