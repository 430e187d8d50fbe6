//! Step plans and their fail-fast executor
//!
//! Each workflow builds a [`Plan`] from explicit paths and tool names, then
//! hands it to a [`PlanExecutor`]. Execution stops at the first failing
//! step; nothing done before it is rolled back.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;

use super::invocation::Invocation;
use super::runner::{CommandRunner, RunResult};
use crate::error::ToolError;

/// One action of a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Create a directory and its parents if absent
    CreateDir { path: PathBuf },
    /// Run an external program
    Run { invocation: Invocation },
    /// Move a directory, replacing the destination if it exists
    MoveDir { from: PathBuf, to: PathBuf },
    /// Write fixed contents to a file and set its permission bits (unix)
    WriteFile {
        path: PathBuf,
        contents: String,
        mode: u32,
    },
    /// Print a progress message
    Note { message: String },
}

impl Step {
    pub fn run(invocation: Invocation) -> Self {
        Step::Run { invocation }
    }

    pub fn note(message: impl Into<String>) -> Self {
        Step::Note {
            message: message.into(),
        }
    }

    /// The invocation, for `Run` steps
    pub fn invocation(&self) -> Option<&Invocation> {
        match self {
            Step::Run { invocation } => Some(invocation),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::CreateDir { path } => write!(f, "mkdir -p {}", path.display()),
            Step::Run { invocation } => match invocation.dir() {
                Some(dir) => write!(f, "(cd {} && {})", dir.display(), invocation),
                None => write!(f, "{}", invocation),
            },
            Step::MoveDir { from, to } => {
                write!(f, "mv {} {}", from.display(), to.display())
            }
            Step::WriteFile { path, mode, .. } => {
                write!(f, "write {} (mode {:o})", path.display(), mode)
            }
            Step::Note { message } => write!(f, "# {}", message),
        }
    }
}

/// An ordered list of steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All invocations in execution order
    pub fn invocations(&self) -> Vec<&Invocation> {
        self.steps.iter().filter_map(Step::invocation).collect()
    }
}

/// Applies plans, either for real or as a printed dry run
pub struct PlanExecutor<'a> {
    runner: &'a dyn CommandRunner,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Create an executor that runs commands through `runner`
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            dry_run: false,
        }
    }

    /// Print steps instead of performing them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute every step in order, stopping at the first failure
    ///
    /// # Returns
    /// * Results of the commands that ran (empty for a dry run)
    ///
    /// # Errors
    /// * `ToolError::CommandFailed` - A command exited non-zero
    /// * `ToolError::ToolNotFound` / `SpawnFailed` - A command could not start
    /// * `ToolError::Io` - A filesystem step failed
    pub fn execute(&self, plan: &Plan) -> Result<Vec<RunResult>, ToolError> {
        let mut results = Vec::new();

        for step in &plan.steps {
            if self.dry_run {
                match step {
                    Step::Note { message } => println!("{}", message),
                    _ => println!("{} {}", "+".dimmed(), step),
                }
                continue;
            }

            tracing::debug!("Step: {}", step);

            match step {
                Step::CreateDir { path } => {
                    if !path.is_dir() {
                        tracing::info!("Creating {}", path.display());
                    }
                    fs::create_dir_all(path)?;
                }
                Step::Run { invocation } => {
                    println!("{} {}", ">".cyan(), invocation.command_line());
                    let result = self.runner.run(invocation)?.check()?;
                    results.push(result);
                }
                Step::MoveDir { from, to } => move_dir(from, to)?,
                Step::WriteFile {
                    path,
                    contents,
                    mode,
                } => write_file(path, contents, *mode)?,
                Step::Note { message } => println!("{}", message),
            }
        }

        Ok(results)
    }
}

/// Move `from` to `to`, replacing an existing `to`
///
/// Falls back to copy-and-delete when a plain rename is refused, e.g. across
/// filesystems.
pub fn move_dir(from: &Path, to: &Path) -> Result<(), ToolError> {
    if !from.is_dir() {
        return Err(ToolError::MissingDirectory {
            path: from.to_path_buf(),
        });
    }

    if to.exists() {
        tracing::warn!("Replacing existing {}", to.display());
        fs::remove_dir_all(to)?;
    }

    if let Err(e) = fs::rename(from, to) {
        tracing::debug!("rename failed ({}), copying instead", e);
        copy_dir(from, to)?;
        fs::remove_dir_all(from)?;
    }

    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str, mode: u32) -> Result<(), ToolError> {
    if path.exists() {
        tracing::warn!("Overwriting {}", path.display());
    }
    fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    {
        let _ = mode;
    }

    Ok(())
}
