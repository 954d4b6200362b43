//! # Shell Module
//!
//! Entry point and command-line logic for the `openbel_ws` binary.
//!
//! ## Sub-modules
//!
//! - **`cli`**: Argument parsing, configuration and dispatch to a mode
//! - **`modes`**: One implementation per subcommand

pub mod cli;
pub mod modes;

pub use cli::{Cli, Command, execute, report_usage, run, usage_exit_code};
