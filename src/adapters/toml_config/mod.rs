// TOML config adapter - Configuration loaded from a TOML file

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::errors::*;
use crate::domain::rules::DEFAULT_MIX_CODEC;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "frameclip.toml";

/// Application configuration
///
/// Every key is optional in the file; missing keys fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// ffmpeg executable
    pub ffmpeg: PathBuf,
    /// ffprobe executable
    pub ffprobe: PathBuf,
    /// Encoder for mixed audio tracks
    pub audio_codec: String,
    /// Default tracing filter, e.g. `"info"` or `"frameclip=debug"`
    pub log_level: String,
    /// `"pretty"` or `"json"`
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            audio_codec: DEFAULT_MIX_CODEC.to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<AppConfig, DomainError> {
        toml::from_str(content).map_err(|e| DomainError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Load configuration from a file that must exist
    pub fn load_file(path: &Path) -> Result<AppConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| DomainError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Load `explicit` if given, else the default file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig, DomainError> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_file(default_path)
                } else {
                    Ok(AppConfig::default())
                }
            }
        }
    }
}
