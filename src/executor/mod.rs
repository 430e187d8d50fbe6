//! Command execution module
//!
//! Provides:
//! - `Invocation` - program + argument list + working directory
//! - `CommandRunner` - the seam between workflows and real processes
//! - `Plan` / `PlanExecutor` - ordered steps applied fail-fast

pub mod invocation;
pub mod plan;
pub mod runner;

pub use invocation::Invocation;
pub use plan::{move_dir, Plan, PlanExecutor, Step};
pub use runner::{CommandRunner, RunResult, SystemRunner};
