//! CLI module: clap-based argument parsing and config validation.

mod clap_parser;

pub use clap_parser::{Cli, Command, DbArgs, delete_config, search_config};
