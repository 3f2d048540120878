//! Command-line driver: argument parsing, operation-mode selection, and
//! display-level/help infrastructure for the `zxc` binary.

pub mod args;
pub mod constants;
pub mod help;
pub mod op_mode;
