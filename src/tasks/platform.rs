//! Host operating system and the build profile chosen for it
//!
//! The OS identity comes from `std::env::consts::OS` unless configuration
//! overrides it; it is passed into the build plan as a plain value.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ToolError;

/// Operating system families with a build profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    /// Generate Unix Makefiles and compile with make
    Linux,
    /// Generate a Visual Studio solution; compile from the IDE
    Windows,
}

impl HostOs {
    /// Resolve the OS, preferring an explicit override over the host
    ///
    /// # Errors
    /// * `ToolError::UnsupportedOs` - If the OS has no build profile
    pub fn detect(override_os: Option<&str>) -> Result<Self, ToolError> {
        let os = override_os.unwrap_or(std::env::consts::OS);
        os.parse()
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostOs::Linux => "linux",
            HostOs::Windows => "windows",
        }
    }

    /// CMake generator used by default on this OS
    pub fn default_generator(&self) -> &'static str {
        match self {
            HostOs::Linux => "Unix Makefiles",
            HostOs::Windows => "Visual Studio 17 2022",
        }
    }

    /// Whether the build driver compiles right after configuring
    pub fn compiles_after_configure(&self) -> bool {
        matches!(self, HostOs::Linux)
    }
}

impl FromStr for HostOs {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linux" => Ok(HostOs::Linux),
            "windows" => Ok(HostOs::Windows),
            _ => Err(ToolError::UnsupportedOs { os: s.to_string() }),
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether a CMake generator accepts a platform name via `-A`
///
/// Only the Visual Studio generators are multi-platform; the others reject
/// `-A` outright.
pub fn generator_supports_platform(generator: &str) -> bool {
    generator.starts_with("Visual Studio")
}
