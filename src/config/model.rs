//! Configuration model for buildhub
//!
//! Defines the structure for XDG-compliant layered configuration and the
//! resolved directory layout derived from it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Settings shared by every workflow
    #[serde(default)]
    pub defaults: Defaults,

    /// Repository layout
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Build driver settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Documentation driver settings
    #[serde(default)]
    pub docs: DocsConfig,

    /// Commit helper settings
    #[serde(default)]
    pub git: GitConfig,

    /// Hook installer settings
    #[serde(default)]
    pub hook: HookConfig,
}

/// Settings shared by every workflow
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Defaults {
    /// Wait for Enter after `build` and `commit` complete
    #[serde(default)]
    pub pause: bool,
}

/// Repository layout, relative to `root`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    /// Repository root
    #[serde(default = "default_root")]
    pub root: String,

    /// Directory holding one subdirectory per project (the CMake source dir)
    #[serde(default = "default_projects_dir")]
    pub projects_dir: String,

    /// Build output directory
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Documentation output directory, relative to `build_dir`
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_projects_dir() -> String {
    "projects".to_string()
}

fn default_build_dir() -> String {
    "_BUILD".to_string()
}

fn default_docs_dir() -> String {
    "docs".to_string()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            projects_dir: default_projects_dir(),
            build_dir: default_build_dir(),
            docs_dir: default_docs_dir(),
        }
    }
}

/// Build driver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Operating system override (default: the host OS)
    pub os: Option<String>,

    /// Generator override (default: chosen per OS)
    pub generator: Option<String>,

    /// Target platform for multi-platform generators (`-A`)
    #[serde(default = "default_architecture")]
    pub architecture: String,

    /// Configuration passed to `cmake --build --config`
    #[serde(default = "default_configuration")]
    pub configuration: String,

    /// Parallel jobs for `make -j`
    pub jobs: Option<usize>,

    /// Command to execute cmake
    #[serde(default = "default_cmake_command")]
    pub cmake: String,

    /// Command to execute make
    #[serde(default = "default_make_command")]
    pub make: String,
}

fn default_architecture() -> String {
    "x64".to_string()
}

fn default_configuration() -> String {
    "Release".to_string()
}

fn default_cmake_command() -> String {
    "cmake".to_string()
}

fn default_make_command() -> String {
    "make".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            os: None,
            generator: None,
            architecture: default_architecture(),
            configuration: default_configuration(),
            jobs: None,
            cmake: default_cmake_command(),
            make: default_make_command(),
        }
    }
}

/// Documentation driver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsConfig {
    /// Command to execute doxygen
    #[serde(default = "default_doxygen_command")]
    pub command: String,

    /// Doxygen configuration file name inside each project
    #[serde(default = "default_doxyfile")]
    pub doxyfile: String,
}

fn default_doxygen_command() -> String {
    "doxygen".to_string()
}

fn default_doxyfile() -> String {
    "Doxyfile".to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            command: default_doxygen_command(),
            doxyfile: default_doxyfile(),
        }
    }
}

/// Commit helper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitConfig {
    /// Command to execute git
    #[serde(default = "default_git_command")]
    pub command: String,
}

fn default_git_command() -> String {
    "git".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            command: default_git_command(),
        }
    }
}

/// Hook installer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HookConfig {
    /// Hook file path, relative to the repository root
    #[serde(default = "default_hook_path")]
    pub path: String,
}

fn default_hook_path() -> String {
    ".git/hooks/pre-commit".to_string()
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            path: default_hook_path(),
        }
    }
}

/// Absolute paths every workflow operates on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub root: PathBuf,
    pub projects: PathBuf,
    pub build: PathBuf,
    pub docs: PathBuf,
    pub hook: PathBuf,
}

impl Config {
    /// Resolve the directory layout
    ///
    /// `~` and `$VAR` are expanded, then relative paths are anchored: the
    /// root against the process working directory, everything else against
    /// the root.
    ///
    /// # Errors
    /// * `ToolError::Config` - If a path references an unset variable
    /// * `ToolError::Io` - If the working directory cannot be read
    pub fn layout(&self) -> Result<Layout, ToolError> {
        let root = std::path::absolute(expand(&self.workspace.root)?)?;
        let under_root = |p: &str| -> Result<PathBuf, ToolError> {
            let path = expand(p)?;
            Ok(if path.is_absolute() { path } else { root.join(path) })
        };

        let projects = under_root(&self.workspace.projects_dir)?;
        let build = under_root(&self.workspace.build_dir)?;
        let docs = {
            let path = expand(&self.workspace.docs_dir)?;
            if path.is_absolute() {
                path
            } else {
                build.join(path)
            }
        };
        let hook = under_root(&self.hook.path)?;

        Ok(Layout {
            root,
            projects,
            build,
            docs,
            hook,
        })
    }

    /// Replace the repository root (from `--root`)
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.workspace.root = root.as_ref().to_string_lossy().to_string();
        self
    }
}

/// Expand `~` and environment variables in a configured path
fn expand(path: &str) -> Result<PathBuf, ToolError> {
    shellexpand::full(path)
        .map(|s| PathBuf::from(s.as_ref()))
        .map_err(|e| ToolError::Config(format!("cannot expand '{}': {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(!config.defaults.pause);
        assert_eq!(config.workspace.root, ".");
        assert_eq!(config.workspace.projects_dir, "projects");
        assert_eq!(config.workspace.build_dir, "_BUILD");
        assert_eq!(config.workspace.docs_dir, "docs");
        assert_eq!(config.hook.path, ".git/hooks/pre-commit");
    }

    #[test]
    fn test_default_tool_commands() {
        let config = Config::default();

        assert_eq!(config.build.cmake, "cmake");
        assert_eq!(config.build.make, "make");
        assert_eq!(config.docs.command, "doxygen");
        assert_eq!(config.docs.doxyfile, "Doxyfile");
        assert_eq!(config.git.command, "git");
        assert_eq!(config.build.architecture, "x64");
        assert_eq!(config.build.configuration, "Release");
        assert!(config.build.os.is_none());
        assert!(config.build.jobs.is_none());
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
            [build]
            jobs = 8
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.build.jobs, Some(8));
        // Defaults should still apply
        assert_eq!(config.build.architecture, "x64");
        assert_eq!(config.workspace.build_dir, "_BUILD");
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
            [defaults]
            pause = true

            [workspace]
            root = "/work/repo"
            projects_dir = "src"
            build_dir = "out"
            docs_dir = "api"

            [build]
            os = "windows"
            generator = "Ninja"
            architecture = "Win32"
            configuration = "Debug"
            cmake = "/opt/cmake/bin/cmake"

            [docs]
            command = "/usr/local/bin/doxygen"
            doxyfile = "docs.cfg"

            [git]
            command = "/usr/bin/git"

            [hook]
            path = ".githooks/pre-commit"
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.defaults.pause);
        assert_eq!(config.workspace.projects_dir, "src");
        assert_eq!(config.build.os, Some("windows".to_string()));
        assert_eq!(config.build.generator, Some("Ninja".to_string()));
        assert_eq!(config.build.architecture, "Win32");
        assert_eq!(config.build.cmake, "/opt/cmake/bin/cmake");
        assert_eq!(config.docs.doxyfile, "docs.cfg");
        assert_eq!(config.git.command, "/usr/bin/git");
        assert_eq!(config.hook.path, ".githooks/pre-commit");
    }

    #[cfg(unix)]
    #[test]
    fn test_layout_relative_to_root() {
        let config = Config::default().with_root("/work/repo");
        let layout = config.layout().unwrap();

        assert_eq!(layout.root, PathBuf::from("/work/repo"));
        assert_eq!(layout.projects, PathBuf::from("/work/repo/projects"));
        assert_eq!(layout.build, PathBuf::from("/work/repo/_BUILD"));
        assert_eq!(layout.docs, PathBuf::from("/work/repo/_BUILD/docs"));
        assert_eq!(layout.hook, PathBuf::from("/work/repo/.git/hooks/pre-commit"));
    }

    #[cfg(unix)]
    #[test]
    fn test_layout_absolute_overrides() {
        let mut config = Config::default().with_root("/work/repo");
        config.workspace.build_dir = "/tmp/build".to_string();
        config.workspace.docs_dir = "/srv/docs".to_string();

        let layout = config.layout().unwrap();
        assert_eq!(layout.build, PathBuf::from("/tmp/build"));
        assert_eq!(layout.docs, PathBuf::from("/srv/docs"));
    }

    #[test]
    fn test_layout_default_root_is_absolute() {
        let layout = Config::default().layout().unwrap();
        assert!(layout.root.is_absolute());
        assert!(layout.projects.ends_with("projects"));
    }

    #[test]
    fn test_layout_expands_env_vars() {
        std::env::set_var("BUILDHUB_TEST_LAYOUT_ROOT", "/expanded/root");
        let config = Config::default().with_root("$BUILDHUB_TEST_LAYOUT_ROOT/repo");
        let layout = config.layout();
        std::env::remove_var("BUILDHUB_TEST_LAYOUT_ROOT");

        let layout = layout.unwrap();
        assert!(layout.root.ends_with("repo"));
        assert!(layout.root.to_string_lossy().contains("expanded"));
    }

    #[test]
    fn test_layout_unset_variable_is_config_error() {
        let config = Config::default().with_root("$BUILDHUB_TEST_SURELY_UNSET_VAR/repo");
        let err = config.layout().unwrap_err();
        assert!(matches!(err, ToolError::Config(_)));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();

        // Should be able to deserialize what we serialized
        let _: Config = toml::from_str(&toml_str).unwrap();
    }
}
