//! Developer workflows
//!
//! Each workflow turns configuration into a [`Plan`](crate::executor::Plan):
//! - `build` - CMake configure, then make on linux
//! - `docs` - doxygen per project, output gathered under the build dir
//! - `commit` - git status/add/commit/push/status
//! - `hook` - pre-commit hook installation

pub mod build;
pub mod commit;
pub mod docs;
pub mod hook;
pub mod platform;

pub use build::BuildProfile;
pub use docs::DocsAction;
pub use platform::HostOs;
