//! Blocking command execution
//!
//! Children inherit stdin/stdout/stderr so tool output (and any credential
//! prompt from `git push`) goes straight to the terminal.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use serde::Serialize;

use super::invocation::Invocation;
use crate::error::ToolError;

/// Result of running one invocation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code if available (None when killed by a signal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Command that was executed
    pub command: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunResult {
    /// Create a successful result
    pub fn success(command: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            command: command.into(),
            duration_ms,
        }
    }

    /// Create a failed result
    pub fn failed(command: impl Into<String>, exit_code: Option<i32>, duration_ms: u64) -> Self {
        Self {
            success: false,
            exit_code,
            command: command.into(),
            duration_ms,
        }
    }

    /// Turn a failed result into `ToolError::CommandFailed`
    pub fn check(self) -> Result<RunResult, ToolError> {
        if self.success {
            Ok(self)
        } else {
            Err(ToolError::command_failed(self.command, self.exit_code))
        }
    }
}

/// Runs external programs
///
/// Implemented by [`SystemRunner`] for real processes; tests substitute
/// mocks or recorders.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run an invocation to completion
    ///
    /// # Errors
    /// * `ToolError::ToolNotFound` - If the program is not on PATH
    /// * `ToolError::SpawnFailed` - If the process could not be started
    ///
    /// A non-zero exit is reported in the returned `RunResult`, not as an error.
    fn run(&self, invocation: &Invocation) -> Result<RunResult, ToolError>;
}

/// Runs invocations as child processes of this process
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a runner that resolves programs on PATH before spawning
    pub fn new() -> Self {
        Self
    }

    /// Resolve a program the way the OS would, reporting a missing tool early
    fn resolve(&self, invocation: &Invocation) -> Result<PathBuf, ToolError> {
        let found = match invocation.dir() {
            Some(dir) => which::which_in(&invocation.program, std::env::var_os("PATH"), dir),
            None => which::which(&invocation.program),
        };

        found.map_err(|e| {
            tracing::debug!("Lookup of '{}' failed: {}", invocation.program, e);
            ToolError::ToolNotFound {
                program: invocation.program.clone(),
            }
        })
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunResult, ToolError> {
        let start = Instant::now();
        let command_str = invocation.command_line();
        let program = self.resolve(invocation)?;

        let mut cmd = Command::new(&program);
        cmd.args(&invocation.args);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        if let Some(dir) = invocation.dir() {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            dir = ?invocation.working_dir,
            "Executing: {}",
            command_str
        );

        let status = cmd.status().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolError::ToolNotFound {
                program: invocation.program.clone(),
            },
            _ => ToolError::SpawnFailed {
                command: command_str.clone(),
                error: e.to_string(),
            },
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;

        if status.success() {
            Ok(RunResult::success(command_str, duration_ms))
        } else {
            tracing::debug!("'{}' exited with {:?}", command_str, status.code());
            Ok(RunResult::failed(command_str, status.code(), duration_ms))
        }
    }
}

/// Runner for tests that records every invocation and succeeds
///
/// `fail_on` makes the first invocation whose command line starts with the
/// given prefix exit with code 1.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingRunner {
    pub calls: std::cell::RefCell<Vec<Invocation>>,
    pub fail_on: Option<String>,
    #[allow(clippy::type_complexity)]
    pub on_run: Option<Box<dyn Fn(&Invocation)>>,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_on: Some(prefix.to_string()),
            ..Default::default()
        }
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.command_line()).collect()
    }
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunResult, ToolError> {
        self.calls.borrow_mut().push(invocation.clone());
        let line = invocation.command_line();
        if let Some(ref prefix) = self.fail_on {
            if line.starts_with(prefix.as_str()) {
                return Ok(RunResult::failed(line, Some(1), 0));
            }
        }
        if let Some(ref hook) = self.on_run {
            hook(invocation);
        }
        Ok(RunResult::success(line, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_result_success() {
        let result = RunResult::success("make", 1234);

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.command, "make");
        assert_eq!(result.duration_ms, 1234);
        assert!(result.check().is_ok());
    }

    #[test]
    fn test_run_result_failed_check() {
        let result = RunResult::failed("git push", Some(128), 10);

        match result.check() {
            Err(ToolError::CommandFailed { command, exit_code }) => {
                assert_eq!(command, "git push");
                assert_eq!(exit_code, Some(128));
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_run_result_serialization() {
        let result = RunResult::success("git status", 100);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"exit_code\":0"));
        assert!(json.contains("\"command\":\"git status\""));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_success() {
        let result = SystemRunner::new()
            .run(&Invocation::new("true"))
            .unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let result = SystemRunner::new()
            .run(&Invocation::new("sh").args(["-c", "exit 3"]))
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.command, "sh -c 'exit 3'");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SystemRunner::new()
            .run(&Invocation::new("sh").args(["-c", "touch marker"]).in_dir(dir.path()))
            .unwrap();

        assert!(result.success);
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn test_system_runner_missing_tool() {
        let result = SystemRunner::new().run(&Invocation::new("nonexistent_command_12345"));

        match result {
            Err(ToolError::ToolNotFound { program }) => {
                assert_eq!(program, "nonexistent_command_12345");
            }
            other => panic!("Expected ToolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_recording_runner_fail_on() {
        let runner = RecordingRunner::failing_on("git push");

        assert!(runner.run(&Invocation::new("git").arg("status")).unwrap().success);
        assert!(!runner.run(&Invocation::new("git").arg("push")).unwrap().success);
        assert_eq!(runner.command_lines(), vec!["git status", "git push"]);
    }
}
