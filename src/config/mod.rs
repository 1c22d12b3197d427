//! Configuration for the asset store.
//!
//! One TOML file covers the three tunables the store actually has: where the
//! persistent root lives, how images are normalized, and the storage budget
//! ceiling. Everything else is fixed by the deployment layout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub images: ImagesConfig,
    pub budget: BudgetConfig,
}

/// Where the persistent storage root lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Well-known mount path of the persistent disk. Used when it exists.
    pub mount_path: PathBuf,
    /// Fallback directory (relative paths resolve against the process
    /// working directory) used when the mount is absent.
    pub local_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mount_path: PathBuf::from("/var/data"),
            local_dir: PathBuf::from("data"),
        }
    }
}

/// Image normalization parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImagesConfig {
    /// Maximum width or height in pixels; larger images are downscaled.
    pub max_dimension: u32,
    /// JPEG quality for lossy re-encoding (1-100).
    pub jpeg_quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1920,
            jpeg_quality: 85,
        }
    }
}

/// Storage budget for the image directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BudgetConfig {
    /// Ceiling on total image storage, in megabytes.
    pub ceiling_mb: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self { ceiling_mb: 512.0 }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from the default location or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_path = Path::new("./waypoint.toml");
    if default_path.exists() {
        return load_config(default_path);
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.images.max_dimension == 0 {
        anyhow::bail!("images.max_dimension cannot be 0");
    }

    if config.images.jpeg_quality == 0 || config.images.jpeg_quality > 100 {
        anyhow::bail!(
            "images.jpeg_quality must be between 1 and 100, got {}",
            config.images.jpeg_quality
        );
    }

    if config.budget.ceiling_mb < 0.0 {
        anyhow::bail!("budget.ceiling_mb cannot be negative");
    }

    if config.storage.mount_path.as_os_str().is_empty() {
        anyhow::bail!("storage.mount_path cannot be empty");
    }

    Ok(())
}
