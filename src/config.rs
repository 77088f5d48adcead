//! Window configuration
//!
//! Profiles load from TOML with environment overrides, so integrations can
//! reshape windows without recompiling.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels; must be non-zero
    pub width: u32,
    /// Window height in pixels; must be non-zero
    pub height: u32,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (title bar, borders)
    pub decorated: bool,
}

impl WindowConfig {
    /// Loads the named profile from `./config/{profile}.toml`
    ///
    /// Environment variables with the `CASEMENT_` prefix override file
    /// values (e.g. `CASEMENT_WIDTH=1920`). Missing files fall back to
    /// defaults, so a bare environment works out of the box.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"), profile)
    }

    /// Loads a profile from an explicit configuration directory
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile_path = dir.join(profile);
        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            .add_source(Environment::with_prefix("CASEMENT").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }

    /// Loads the profile named by `CASEMENT_PROFILE`, defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("CASEMENT_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "casement".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            resizable: true,
            decorated: true,
        }
    }
}
