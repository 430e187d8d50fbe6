//! buildhub - developer workflow runner
//!
//! Wraps the external tools a CMake/C++ repository is maintained with:
//! - **build** - `cmake` configure into `_BUILD`, then `make` on linux
//! - **docs** - `doxygen` per project, HTML gathered under `_BUILD/docs`
//! - **commit** - `git status/add/commit/push/status`
//! - **hook** - install a clang-format pre-commit hook
//!
//! ## Features
//!
//! - Explicit paths and OS values; no working-directory changes
//! - Argument lists instead of shell strings
//! - Fail-fast plans with a `--dry-run` preview
//! - XDG-compliant layered configuration with `BUILDHUB_*` overrides

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod tasks;

pub use cli::{Cli, Commands};
pub use config::{load_config, Config, Layout};
pub use error::ToolError;
pub use executor::{CommandRunner, Invocation, Plan, PlanExecutor, RunResult, Step, SystemRunner};
pub use tasks::{BuildProfile, DocsAction, HostOs};
