use std::path::{Path, PathBuf};

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::normalization::DEFAULT_DURATION_TOLERANCE_SECS;
use crate::youtube_rs::DEFAULT_API_BASE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub youtube: Option<YoutubeConfig>,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Used by the external OAuth flow that mints access tokens.
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            client_id: None,
            client_secret: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_duration_tolerance")]
    pub duration_tolerance_secs: u32,
}

fn default_duration_tolerance() -> u32 {
    DEFAULT_DURATION_TOLERANCE_SECS
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            duration_tolerance_secs: default_duration_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where relative `--output` paths of `compare` are written.
    pub directory: String,
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("playlister").join("config.toml"))
    }

    /// Load the default config file, falling back to defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write a default config file, if it doesn't exist
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_eyre("No config directory on this platform")?;
        Self::write_default(&path)?;
        Ok(path)
    }

    fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            tracing::info!(path = %path.display(), "Config file already exists");
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let config = Config {
            youtube: Some(YoutubeConfig::default()),
            ..Default::default()
        };
        let contents = toml::to_string_pretty(&config).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Expand ~ to home directory
    fn expand_path(path: &str) -> PathBuf {
        match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        }
    }

    pub fn youtube_api_base(&self) -> Result<Url> {
        let base = self
            .youtube
            .as_ref()
            .map_or(DEFAULT_API_BASE, |y| y.api_base.as_str());
        Url::parse(base).wrap_err_with(|| format!("Invalid YouTube api_base: {base}"))
    }

    pub fn duration_tolerance_secs(&self) -> u32 {
        self.matching.duration_tolerance_secs
    }

    /// Resolve an export path. Relative paths land in `[export] directory` when set.
    pub fn export_path(&self, path: &Path) -> PathBuf {
        match &self.export {
            Some(export) if path.is_relative() => {
                Self::expand_path(&export.directory).join(path)
            }
            _ => path.to_path_buf(),
        }
    }
}
