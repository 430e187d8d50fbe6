//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};

use crate::tasks::DocsAction;

/// Developer workflow runner for CMake/Doxygen/git repositories.
///
/// Builds the projects directory with CMake, generates Doxygen docs for each
/// project, commits and pushes all changes, and installs a clang-format
/// pre-commit hook.
#[derive(Parser, Debug)]
#[command(name = "buildhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Repository root (defaults to [workspace].root, then the current directory)
    #[arg(long, global = true, env = "BUILDHUB_ROOT")]
    pub root: Option<String>,

    /// Print the steps instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Wait for Enter before exiting after build/commit
    #[arg(long, global = true)]
    pub pause: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure the projects with CMake (and compile them on linux)
    Build,

    /// Generate Doxygen docs for every project
    Docs(DocsArgs),

    /// Stage, commit and push all changes
    Commit(CommitArgs),

    /// Install the clang-format pre-commit hook
    Hook,

    /// Show resolved configuration and build profile
    Config(ConfigArgs),
}

/// Arguments for the `docs` subcommand
#[derive(Parser, Debug)]
pub struct DocsArgs {
    #[command(subcommand)]
    pub action: Option<DocsCommand>,
}

/// Optional `docs` actions (default: generate)
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocsCommand {
    /// Run doxygen and collect the HTML output (default)
    Generate,
    /// Create a template Doxyfile in projects that lack one
    Init,
    /// Upgrade existing Doxyfiles
    Update,
}

impl DocsArgs {
    pub fn docs_action(&self) -> DocsAction {
        match self.action {
            None | Some(DocsCommand::Generate) => DocsAction::Generate,
            Some(DocsCommand::Init) => DocsAction::Init,
            Some(DocsCommand::Update) => DocsAction::Update,
        }
    }
}

/// Arguments for the `commit` subcommand
#[derive(Parser, Debug)]
pub struct CommitArgs {
    /// Commit message (prompted for when omitted)
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the `config` subcommand
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
    /// TOML output (configuration only)
    Toml,
}
