//! 30Plants command-line interface.
//!
//! Every user action of the app is a subcommand; `serve` starts the HTTP API.

pub mod cli;
pub mod commands;
