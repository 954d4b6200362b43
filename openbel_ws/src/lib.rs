//! # OpenBEL Web API Examples
//!
//! Command-line examples for the OpenBEL Framework Web API, built on
//! [`openbel_ws_client`]. Each subcommand of the `openbel_ws` binary loads a
//! KAM on a running service and walks one part of the API: catalog and
//! documents, node and edge resolution, supporting evidence, edge searches
//! and KAM summaries.
//!
//! ## Modules
//!
//! - **`config`**: TOML configuration and command-line overrides.
//! - **`output`**: Text, CSV and JSON renderings of results.
//! - **`shell`**: Argument parsing and the per-subcommand modes.
//! - **`utils`**: Logging setup.

pub mod config;
pub mod output;
pub mod shell;
pub mod utils;
