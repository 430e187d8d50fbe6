//! buildhub CLI entry point
//!
//! Usage:
//!   buildhub build               Configure with CMake (compile on linux)
//!   buildhub docs [init|update]  Generate Doxygen docs for every project
//!   buildhub commit [-m MSG]     git status/add/commit/push/status
//!   buildhub hook                Install the pre-commit hook
//!   buildhub config              Show configuration

use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use buildhub::cli::{
    commands::{CommitArgs, ConfigArgs, DocsArgs, OutputFormat},
    Cli, Commands,
};
use buildhub::config::{find_config_files, load_config, Config, Layout};
use buildhub::error::ToolError;
use buildhub::executor::{PlanExecutor, SystemRunner};
use buildhub::logging::init_cli_logger;
use buildhub::tasks::{self, commit, BuildProfile};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            if let Some(hint) = e.downcast_ref::<ToolError>().and_then(ToolError::suggestion) {
                eprintln!("{}: {}", "hint".yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(ref root) = cli.root {
        config = config.with_root(root);
    }
    let layout = config
        .layout()
        .context("Failed to resolve repository layout")?;
    tracing::debug!(root = %layout.root.display(), "Resolved layout");

    let pause = (cli.pause || config.defaults.pause) && !cli.dry_run;
    let runner = SystemRunner::new();
    let executor = PlanExecutor::new(&runner).dry_run(cli.dry_run);

    match cli.command {
        Commands::Build => {
            build(&config, &layout, &executor)?;
            if pause {
                wait_for_enter()?;
            }
        }
        Commands::Docs(args) => {
            docs(args, &config, &layout, &executor)?;
        }
        Commands::Commit(args) => {
            commit_and_push(args, &config, &layout, &executor)?;
            if pause {
                wait_for_enter()?;
            }
        }
        Commands::Hook => {
            let plan = tasks::hook::plan(&layout.hook);
            executor.execute(&plan)?;
        }
        Commands::Config(args) => {
            show_config(args, &config, &layout)?;
        }
    }

    Ok(())
}

/// Configure and (on linux) compile the projects
fn build(config: &Config, layout: &Layout, executor: &PlanExecutor<'_>) -> Result<()> {
    let profile = BuildProfile::from_config(&config.build)?;
    tracing::info!(os = %profile.os, generator = %profile.generator, "Building");

    let plan = tasks::build::plan(&profile, &config.build, layout);
    executor.execute(&plan)?;

    if !executor.is_dry_run() {
        println!("\n{}", "Build completed".green());
    }
    Ok(())
}

/// Run the selected documentation action over every project
fn docs(args: DocsArgs, config: &Config, layout: &Layout, executor: &PlanExecutor<'_>) -> Result<()> {
    let action = args.docs_action();
    tracing::info!(?action, projects = %layout.projects.display(), "Documenting");

    let plan = tasks::docs::plan(action, &config.docs, layout)?;
    if plan.is_empty() {
        println!("{}", "Nothing to do".dimmed());
        return Ok(());
    }
    executor.execute(&plan)?;
    Ok(())
}

/// Stage, commit and push everything in the repository root
fn commit_and_push(
    args: CommitArgs,
    config: &Config,
    layout: &Layout,
    executor: &PlanExecutor<'_>,
) -> Result<()> {
    let message = match args.message {
        Some(message) => message,
        None => commit::ask_message().context("Failed to read commit message")?,
    };

    let plan = commit::plan(&config.git, &layout.root, &message);
    executor.execute(&plan)?;
    Ok(())
}

/// Show resolved configuration, layout and build profile
fn show_config(args: ConfigArgs, config: &Config, layout: &Layout) -> Result<()> {
    let profile = BuildProfile::from_config(&config.build);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "config_files": find_config_files(),
                "config": config,
                "layout": layout,
                "profile": profile.as_ref().ok(),
            }))?;
            println!("{}", json);
        }
        OutputFormat::Toml => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        OutputFormat::Table => {
            let files = find_config_files();
            if files.is_empty() {
                println!("{}: {}", "Config files".cyan(), "none (defaults)");
            } else {
                println!("{}:", "Config files".cyan());
                for file in &files {
                    println!("  - {}", file.display());
                }
            }
            println!();
            println!("{}: {}", "Root".cyan(), layout.root.display());
            println!("{}: {}", "Projects".cyan(), layout.projects.display());
            println!("{}: {}", "Build dir".cyan(), layout.build.display());
            println!("{}: {}", "Docs dir".cyan(), layout.docs.display());
            println!("{}: {}", "Hook".cyan(), layout.hook.display());
            println!();
            println!("{}", profile_summary(&profile));
        }
    }

    Ok(())
}

fn profile_summary(profile: &Result<BuildProfile, ToolError>) -> String {
    match profile {
        Ok(profile) => format!(
            "{}: {}\n{}: {}\n{}: {} ({})",
            "OS".cyan(),
            profile.os,
            "Generator".cyan(),
            profile.generator,
            "Build command".cyan(),
            profile.build,
            if profile.compiles {
                "runs after configure"
            } else {
                "not run"
            }
        ),
        Err(e) => format!("{}: {}", "OS".cyan(), e.to_string().yellow()),
    }
}

/// Block until the user presses Enter
fn wait_for_enter() -> Result<()> {
    print!("Press Enter to exit...");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildhub::config::BuildConfig;
    use buildhub::tasks::HostOs;

    #[test]
    fn test_profile_summary_linux() {
        colored::control::set_override(false);
        let profile = Ok(BuildProfile::for_os(HostOs::Linux, &BuildConfig::default()));
        let summary = profile_summary(&profile);

        assert!(summary.contains("OS: linux"));
        assert!(summary.contains("Generator: Unix Makefiles"));
        assert!(summary.contains("runs after configure"));
    }

    #[test]
    fn test_profile_summary_windows() {
        colored::control::set_override(false);
        let profile = Ok(BuildProfile::for_os(HostOs::Windows, &BuildConfig::default()));
        let summary = profile_summary(&profile);

        assert!(summary.contains("cmake --build . --config Release"));
        assert!(summary.contains("not run"));
    }

    #[test]
    fn test_profile_summary_unsupported() {
        colored::control::set_override(false);
        let profile = Err(ToolError::UnsupportedOs {
            os: "plan9".to_string(),
        });
        assert!(profile_summary(&profile).contains("plan9"));
    }
}
