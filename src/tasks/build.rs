//! Build driver
//!
//! Configures the projects directory with CMake into the build directory,
//! then compiles with make on linux. On windows only the Visual Studio
//! solution is generated.

use serde::Serialize;

use super::platform::{generator_supports_platform, HostOs};
use crate::config::{BuildConfig, Layout};
use crate::error::ToolError;
use crate::executor::{Invocation, Plan, Step};

/// Generator and build command selected for an OS
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildProfile {
    pub os: HostOs,
    pub generator: String,
    /// Command that compiles the configured tree
    pub build: Invocation,
    /// Whether `build` runs as part of the build driver
    pub compiles: bool,
}

impl BuildProfile {
    /// Select the profile for `os`, applying config overrides
    pub fn for_os(os: HostOs, config: &BuildConfig) -> Self {
        let generator = config
            .generator
            .clone()
            .unwrap_or_else(|| os.default_generator().to_string());

        let build = match os {
            HostOs::Linux => {
                let make = Invocation::new(&config.make);
                match config.jobs {
                    Some(jobs) => make.args(["-j".to_string(), jobs.to_string()]),
                    None => make,
                }
            }
            HostOs::Windows => Invocation::new(&config.cmake).args([
                "--build",
                ".",
                "--config",
                config.configuration.as_str(),
            ]),
        };

        Self {
            os,
            generator,
            build,
            compiles: os.compiles_after_configure(),
        }
    }

    /// Resolve the profile from config (override or host OS)
    ///
    /// # Errors
    /// * `ToolError::UnsupportedOs` - If the OS has no profile
    pub fn from_config(config: &BuildConfig) -> Result<Self, ToolError> {
        let os = HostOs::detect(config.os.as_deref())?;
        Ok(Self::for_os(os, config))
    }
}

/// Plan the build
///
/// Steps: create the build directory, configure, then compile when the
/// profile compiles. Every command runs inside the build directory.
pub fn plan(profile: &BuildProfile, config: &BuildConfig, layout: &Layout) -> Plan {
    let mut plan = Plan::new();

    let mut configure = Invocation::new(&config.cmake)
        .arg(layout.projects.to_string_lossy())
        .args(["-G", profile.generator.as_str()]);
    if generator_supports_platform(&profile.generator) {
        configure = configure.args(["-A", config.architecture.as_str()]);
    }

    plan.push(Step::CreateDir {
        path: layout.build.clone(),
    });
    plan.push(Step::run(configure.in_dir(&layout.build)));

    if profile.compiles {
        plan.push(Step::run(profile.build.clone().in_dir(&layout.build)));
    } else {
        plan.push(Step::note(format!(
            "Project generated in {} ({}). Compile it from the IDE or with: {}",
            layout.build.display(),
            profile.generator,
            profile.build
        )));
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::executor::runner::RecordingRunner;
    use crate::executor::PlanExecutor;
    use tempfile::TempDir;

    fn setup(os: &str) -> (TempDir, Config, Layout) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default().with_root(dir.path());
        config.build.os = Some(os.to_string());
        let layout = config.layout().unwrap();
        (dir, config, layout)
    }

    fn plan_for(config: &Config, layout: &Layout) -> Plan {
        let profile = BuildProfile::from_config(&config.build).unwrap();
        plan(&profile, &config.build, layout)
    }

    #[test]
    fn test_linux_profile() {
        let profile = BuildProfile::for_os(HostOs::Linux, &BuildConfig::default());

        assert_eq!(profile.generator, "Unix Makefiles");
        assert_eq!(profile.build.command_line(), "make");
        assert!(profile.compiles);
    }

    #[test]
    fn test_windows_profile() {
        let profile = BuildProfile::for_os(HostOs::Windows, &BuildConfig::default());

        assert_eq!(profile.generator, "Visual Studio 17 2022");
        assert_eq!(
            profile.build.command_line(),
            "cmake --build . --config Release"
        );
        assert!(!profile.compiles);
    }

    #[test]
    fn test_profile_overrides() {
        let config = BuildConfig {
            generator: Some("Ninja".to_string()),
            jobs: Some(8),
            ..Default::default()
        };
        let profile = BuildProfile::for_os(HostOs::Linux, &config);

        assert_eq!(profile.generator, "Ninja");
        assert_eq!(profile.build.command_line(), "make -j 8");
    }

    #[test]
    fn test_unknown_os_has_no_profile() {
        let config = BuildConfig {
            os: Some("plan9".to_string()),
            ..Default::default()
        };
        let err = BuildProfile::from_config(&config).unwrap_err();
        assert!(matches!(err, ToolError::UnsupportedOs { .. }));
    }

    #[test]
    fn test_linux_plan_configures_then_builds() {
        let (_dir, config, layout) = setup("linux");
        let plan = plan_for(&config, &layout);

        assert_eq!(
            plan.steps[0],
            Step::CreateDir {
                path: layout.build.clone()
            }
        );

        let invocations = plan.invocations();
        assert_eq!(invocations.len(), 2);
        assert_eq!(invocations[0].program, "cmake");
        assert_eq!(
            invocations[0].args,
            vec![
                layout.projects.to_string_lossy().to_string(),
                "-G".to_string(),
                "Unix Makefiles".to_string()
            ]
        );
        assert_eq!(invocations[1].program, "make");
        assert!(invocations
            .iter()
            .all(|inv| inv.dir() == Some(layout.build.as_path())));
    }

    #[test]
    fn test_windows_plan_only_configures() {
        let (_dir, config, layout) = setup("windows");
        let plan = plan_for(&config, &layout);

        let invocations = plan.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(
            &invocations[0].args[1..],
            &["-G", "Visual Studio 17 2022", "-A", "x64"]
        );
        assert!(matches!(plan.steps.last(), Some(Step::Note { .. })));
    }

    #[test]
    fn test_execute_linux_build() {
        let (_dir, config, layout) = setup("linux");
        let plan = plan_for(&config, &layout);
        let runner = RecordingRunner::default();

        PlanExecutor::new(&runner).execute(&plan).unwrap();

        assert!(layout.build.is_dir());
        let lines = runner.command_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("cmake "));
        assert_eq!(lines[1], "make");
    }

    #[test]
    fn test_configure_failure_skips_build() {
        let (_dir, config, layout) = setup("linux");
        let plan = plan_for(&config, &layout);
        let runner = RecordingRunner::failing_on("cmake");

        let err = PlanExecutor::new(&runner).execute(&plan).unwrap_err();

        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(runner.calls.borrow().len(), 1);
        // The build directory created before the failure stays in place
        assert!(layout.build.is_dir());
    }
}
