//! Application Configuration
//!
//! User settings stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Badge and font assets
    pub assets: AssetSettings,
    /// Display surface settings
    pub view: ViewSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Asset locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory holding `<kind>_<family>.png` badges; defaults to the data dir
    pub badge_dir: Option<PathBuf>,
    /// Font used for rasterized labels
    pub font: Option<PathBuf>,
}

/// Display surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// View width in pixels, used when no frame image is given
    pub width: u32,
    /// View height in pixels, used when no frame image is given
    pub height: u32,
    /// Outline matched regions
    pub outline_regions: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            outline_regions: false,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
