//! Commit helper
//!
//! Stages everything, commits with the given message, pushes, and shows the
//! status before and after.

use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use crate::config::GitConfig;
use crate::error::ToolError;
use crate::executor::{Invocation, Plan, Step};

/// Prompt shown when no message is given on the command line
pub const MESSAGE_PROMPT: &str = "<commit description>";

/// Read one line from `input` after writing `prompt` to `output`
///
/// The trailing line ending is removed; everything else is kept verbatim.
/// End of input yields an empty message.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> std::io::Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

/// Ask for the commit message on stdin
///
/// A terminal gets an interactive prompt; piped input is read as one line.
pub fn ask_message() -> Result<String, ToolError> {
    if std::io::stdin().is_terminal() {
        return inquire::Text::new(MESSAGE_PROMPT)
            .prompt()
            .map_err(|e| ToolError::Prompt(e.to_string()));
    }

    let message = prompt_line(
        &mut std::io::stdin().lock(),
        &mut std::io::stdout(),
        MESSAGE_PROMPT,
    )?;
    Ok(message)
}

/// Plan status, add, commit, push, status in the repository root
///
/// The message is one argv entry; it is never parsed by a shell.
pub fn plan(config: &GitConfig, root: &Path, message: &str) -> Plan {
    let git = |args: &[&str]| Invocation::new(&config.command).args(args.iter().copied()).in_dir(root);

    let mut plan = Plan::new();
    plan.push(Step::run(git(&["status"])));
    plan.push(Step::run(git(&["add", "--all"])));
    plan.push(Step::run(git(&["commit", "-m", message])));
    plan.push(Step::run(git(&["push"])));
    plan.push(Step::run(git(&["status"])));
    plan
}
