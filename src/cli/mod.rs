//! CLI module for buildhub
//!
//! Provides command-line interface with the following subcommands:
//! - `build` - Configure (and on linux compile) with CMake
//! - `docs` - Generate Doxygen docs per project
//! - `commit` - Stage, commit and push
//! - `hook` - Install the pre-commit hook
//! - `config` - Show configuration

pub mod commands;

pub use commands::{Cli, Commands};
