//! Documentation driver
//!
//! Runs doxygen in every project under the projects directory and gathers
//! the HTML output under `<build>/docs/<project>`.
//!
//! # Output location
//!
//! The HTML directory is `OUTPUT_DIRECTORY/HTML_OUTPUT` from the project's
//! Doxyfile, relative to the project. Doxygen's defaults (empty and `html`)
//! apply when a key is absent.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DocsConfig, Layout};
use crate::error::ToolError;
use crate::executor::{Invocation, Plan, Step};

/// Matches `KEY = value` assignments in a Doxyfile
static ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Z_]+)\s*=\s*(.*?)\s*$").unwrap());

/// What the documentation driver does with each project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocsAction {
    /// Run doxygen and relocate the HTML output
    #[default]
    Generate,
    /// Create a template Doxyfile where none exists
    Init,
    /// Upgrade existing Doxyfiles to the installed doxygen version
    Update,
}

/// One documented project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocUnit {
    pub name: String,
    pub dir: PathBuf,
}

impl DocUnit {
    pub fn doxyfile(&self, config: &DocsConfig) -> PathBuf {
        self.dir.join(&config.doxyfile)
    }
}

/// List project directories, sorted by name
///
/// Regular files in the projects directory are ignored.
///
/// # Errors
/// * `ToolError::MissingDirectory` - If the projects directory does not exist
/// * `ToolError::Io` - If the directory cannot be read
pub fn discover_units(projects: &Path) -> Result<Vec<DocUnit>, ToolError> {
    if !projects.is_dir() {
        return Err(ToolError::MissingDirectory {
            path: projects.to_path_buf(),
        });
    }

    let mut units = Vec::new();
    for entry in fs::read_dir(projects)? {
        let entry = entry?;
        // follows symlinks so linked projects count as units
        if entry.path().is_dir() {
            units.push(DocUnit {
                name: entry.file_name().to_string_lossy().to_string(),
                dir: entry.path(),
            });
        }
    }
    units.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(units)
}

/// HTML output directory doxygen writes for a Doxyfile, relative to the project
///
/// Later assignments win; `+=` appends are ignored since neither key is a list.
pub fn html_output_dir(doxyfile_contents: &str) -> PathBuf {
    let mut output_directory = String::new();
    let mut html_output = "html".to_string();

    for line in doxyfile_contents.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        if let Some(caps) = ASSIGNMENT_RE.captures(line) {
            let value = caps[2].trim_matches('"').to_string();
            match &caps[1] {
                "OUTPUT_DIRECTORY" => output_directory = value,
                "HTML_OUTPUT" if !value.is_empty() => html_output = value,
                _ => {}
            }
        }
    }

    PathBuf::from(output_directory).join(html_output)
}

/// Resolve where a unit's HTML lands, reading its Doxyfile if present
fn unit_html_dir(unit: &DocUnit, config: &DocsConfig) -> PathBuf {
    let relative = match fs::read_to_string(unit.doxyfile(config)) {
        Ok(contents) => html_output_dir(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No Doxyfile for {}, assuming html output", unit.name);
            PathBuf::from("html")
        }
        Err(e) => {
            tracing::warn!(
                "Cannot read Doxyfile for {} ({}), assuming html output",
                unit.name,
                e
            );
            PathBuf::from("html")
        }
    };

    if relative.is_absolute() {
        relative
    } else {
        unit.dir.join(relative)
    }
}

/// Plan documentation work for every unit
///
/// For `Generate` each unit is documented and relocated before the next
/// unit is touched.
///
/// # Errors
/// * `ToolError::MissingDirectory` - If the projects directory does not exist
pub fn plan(action: DocsAction, config: &DocsConfig, layout: &Layout) -> Result<Plan, ToolError> {
    let units = discover_units(&layout.projects)?;
    if units.is_empty() {
        tracing::warn!("No projects found in {}", layout.projects.display());
    }

    let mut plan = Plan::new();
    match action {
        DocsAction::Generate => {
            plan.push(Step::CreateDir {
                path: layout.build.clone(),
            });
            plan.push(Step::CreateDir {
                path: layout.docs.clone(),
            });

            for unit in &units {
                let doxygen = Invocation::new(&config.command)
                    .arg(&config.doxyfile)
                    .in_dir(&unit.dir);
                plan.push(Step::run(doxygen));
                plan.push(Step::MoveDir {
                    from: unit_html_dir(unit, config),
                    to: layout.docs.join(&unit.name),
                });
                plan.push(Step::note(format!("> Docs generated: {}", unit.name)));
            }

            plan.push(Step::note("\n>> All docs generated"));
        }
        DocsAction::Init => {
            for unit in units.iter().filter(|u| !u.doxyfile(config).exists()) {
                let doxygen = Invocation::new(&config.command)
                    .args(["-g", config.doxyfile.as_str()])
                    .in_dir(&unit.dir);
                plan.push(Step::run(doxygen));
                plan.push(Step::note(format!("> Doxyfile created: {}", unit.name)));
            }
        }
        DocsAction::Update => {
            for unit in units.iter().filter(|u| u.doxyfile(config).exists()) {
                let doxygen = Invocation::new(&config.command)
                    .args(["-u", config.doxyfile.as_str()])
                    .in_dir(&unit.dir);
                plan.push(Step::run(doxygen));
                plan.push(Step::note(format!("> Doxyfile updated: {}", unit.name)));
            }
        }
    }

    Ok(plan)
}
