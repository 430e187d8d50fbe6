//! Error types for buildhub
//!
//! Every failure is fatal for the current run: the binary prints the error
//! (plus a suggestion when one is known) and exits with status 1.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for workflow operations
#[derive(Error, Debug)]
pub enum ToolError {
    /// Host operating system has no build profile
    #[error("OS unknown: '{os}' has no build profile (supported: linux, windows)")]
    UnsupportedOs { os: String },

    /// Program could not be found on PATH
    #[error("Command not found: {program}")]
    ToolNotFound { program: String },

    /// Failed to spawn the command
    #[error("Failed to spawn command: {command}: {error}")]
    SpawnFailed { command: String, error: String },

    /// Command ran and reported failure
    #[error("Command failed -> {}: {command}", describe_exit(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// A directory the workflow reads from does not exist
    #[error("Directory not found: {}", .path.display())]
    MissingDirectory { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interactive prompt was cancelled or could not be shown
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render an exit code for messages; `None` means the process was killed by a signal
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl ToolError {
    /// Build a `CommandFailed` error
    pub fn command_failed(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        ToolError::CommandFailed {
            command: command.into(),
            exit_code,
        }
    }

    /// Exit code reported by the failing command, if any
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    /// Suggest a fix for the error, when a common cause is known
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ToolError::UnsupportedOs { .. } => Some(
                "Set [build].os in .buildhub.toml or BUILDHUB_BUILD__OS to 'linux' or 'windows'"
                    .to_string(),
            ),
            ToolError::ToolNotFound { program } => suggest_install(program),
            ToolError::CommandFailed { command, .. } => suggest_fix(command),
            ToolError::MissingDirectory { .. } => {
                Some("Run from the repository root or pass --root <dir>".to_string())
            }
            ToolError::Config(_) => {
                Some("Check your buildhub configuration file".to_string())
            }
            ToolError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Some("A parent directory is missing. Is this a git repository?".to_string())
            }
            _ => None,
        }
    }
}

/// Suggest how to install a missing program
pub fn suggest_install(program: &str) -> Option<String> {
    let name = std::path::Path::new(program)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match name.as_str() {
        "cmake" => Some("'cmake' not found. Install CMake from your package manager or cmake.org".to_string()),
        "make" => Some("'make' not found. Install build-essential or make".to_string()),
        "doxygen" => Some("'doxygen' not found. Install doxygen from your package manager or doxygen.nl".to_string()),
        "git" => Some("'git' not found. Install git and make sure it is on PATH".to_string()),
        _ => Some(format!("'{}' not found. Check PATH and dependencies", program)),
    }
}

/// Suggest fixes for a failed command line
pub fn suggest_fix(command: &str) -> Option<String> {
    let mut words = command.split_whitespace();
    let program = words.next().unwrap_or_default();
    let sub = words.next().unwrap_or_default();

    if program.ends_with("git") {
        return match sub {
            "commit" => Some(
                "Nothing staged or an empty message. Check 'git status' and retry with a message"
                    .to_string(),
            ),
            "push" => Some(
                "Push rejected. Pull remote changes or set an upstream branch, then push again"
                    .to_string(),
            ),
            _ => None,
        };
    }

    if program.ends_with("cmake") {
        return Some(
            "CMake configuration failed. Check projects/CMakeLists.txt and the selected generator"
                .to_string(),
        );
    }

    if program.ends_with("doxygen") {
        return Some(
            "Doxygen failed. Create a Doxyfile with 'buildhub docs init'".to_string(),
        );
    }

    None
}
