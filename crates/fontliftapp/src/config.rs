//! # Configuration
//!
//! Fontlift configuration is managed by [`confique`], layered in priority order:
//! 1. **Environment variables**: `FONTLIFT_SIMULATE`, `FONTLIFT_THIRD_PARTY_CACHES`,
//!    `FONTLIFT_RESTART_FONT_SERVER`.
//! 2. **Config file**: `fontlift.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `simulate` | unset | JSON registry replacing the system font service |
//! | `third_party_caches` | `true` | Clear Adobe and Microsoft Office font caches on cleanup |
//! | `restart_font_server` | `true` | Restart the font server after clearing its databases |
//!
//! The protected system font directories are not configurable.

use crate::error::{FontliftError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "fontlift.toml";

/// Configuration for fontlift, stored in `fontlift.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FontliftConfig {
    /// JSON registry file standing in for the system font service.
    /// Intended for testing without touching the real system.
    #[config(env = "FONTLIFT_SIMULATE")]
    pub simulate: Option<PathBuf>,

    /// Clear font caches kept by third-party applications during cleanup.
    #[config(default = true, env = "FONTLIFT_THIRD_PARTY_CACHES")]
    pub third_party_caches: bool,

    /// Restart the font server after clearing its databases.
    #[config(default = true, env = "FONTLIFT_RESTART_FONT_SERVER")]
    pub restart_font_server: bool,
}

impl Default for FontliftConfig {
    fn default() -> Self {
        Self {
            simulate: None,
            third_party_caches: true,
            restart_font_server: true,
        }
    }
}

impl FontliftConfig {
    /// Default directory holding `fontlift.toml`.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "fontlift", "fontlift").map(|d| d.config_dir().to_path_buf())
    }

    /// Load from the environment and `config_dir/fontlift.toml` (if present).
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(dir) = config_dir {
            builder = builder.file(dir.join(CONFIG_FILENAME));
        }
        builder
            .load()
            .map_err(|e| FontliftError::Config(e.to_string()))
    }
}
