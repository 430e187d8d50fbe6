//! Configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/buildhub/config.toml` (lowest priority)
//! 2. `~/.config/buildhub/config.toml`
//! 3. `~/.buildhub.toml`
//! 4. `./.buildhub.toml` (highest priority)

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "buildhub";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "BUILDHUB_";

/// Get XDG config search paths in priority order (lowest to highest)
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide config (lowest priority)
    paths.push(PathBuf::from(format!("/etc/{}/config.toml", APP_NAME)));

    // 2. XDG config home
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    // 3. Home directory
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", APP_NAME)));
    }

    // 4. Current directory / project root (highest priority)
    paths.push(PathBuf::from(format!(".{}.toml", APP_NAME)));

    paths
}

/// Load configuration with XDG layering
///
/// Configurations are merged in priority order, with later files
/// overriding earlier ones. Environment variables with prefix
/// `BUILDHUB_` override all file-based configuration.
///
/// # Arguments
/// * `override_path` - Optional path to a config file that takes highest priority
///
/// # Returns
/// * `Result<Config>` - The merged configuration
pub fn load_config(override_path: Option<&str>) -> Result<Config> {
    let mut figment = Figment::new();

    // Start with defaults
    figment = figment.merge(Serialized::defaults(Config::default()));

    // Layer configs from lowest to highest priority
    for path in config_paths() {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    // Override path takes highest priority (if provided)
    if let Some(path) = override_path {
        let path = PathBuf::from(path);
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::warn!("Override config not found: {}", path.display());
        }
    }

    // Environment variables override everything
    // Format: BUILDHUB_BUILD__OS=windows
    // Maps to: build.os = "windows"
    // BUILDHUB_ROOT is the --root flag, not a config key
    figment = figment.merge(
        Env::prefixed(ENV_PREFIX)
            .ignore(&["root"])
            .split("__"),
    );

    figment.extract().context("Failed to load configuration")
}

/// Find all existing config files (for introspection)
pub fn find_config_files() -> Vec<PathBuf> {
    config_paths().into_iter().filter(|p| p.exists()).collect()
}
