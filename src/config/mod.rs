//! Configuration module
//!
//! Provides XDG-compliant layered configuration with `BUILDHUB_*`
//! environment overrides and `~`/`$VAR` expansion in paths.

pub mod loader;
pub mod model;

pub use loader::*;
pub use model::*;
