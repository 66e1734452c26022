use crate::app::cli::Args;
use crate::app::keys::KeyConfig;
use crate::ui::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User-editable settings, stored in `config.toml`.
/// Read once at startup; the player never writes session state back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin of the music server (listing at `/music`, files at `/music/{name}`)
    #[serde(default = "default_server")]
    pub server: String,
    /// Initial volume, 0.0 - 1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Notifications on track changes and play/pause
    #[serde(default = "default_true")]
    pub notifications: bool,
    /// Also raise desktop notifications when the terminal supports them
    #[serde(default = "default_true")]
    pub desktop_notifications: bool,
    #[serde(default)]
    pub keys: KeyConfig,
    #[serde(default)]
    pub theme: Theme,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_volume() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            volume: default_volume(),
            notifications: true,
            desktop_notifications: true,
            keys: KeyConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("aurora")
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads `config.toml`, writing the defaults on first run.
    /// A broken file is reported and replaced by defaults for this session only.
    pub fn load() -> Self {
        let path = Self::get_config_path();
        if path.exists() {
            return match Self::load_from(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Using default config");
                    Self::default()
                }
            };
        }

        let config = Self::default();
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match config.to_toml() {
            Ok(content) => match fs::write(&path, content) {
                Ok(()) => info!(path = %path.display(), "Wrote default config"),
                Err(e) => warn!(path = %path.display(), error = %e, "Cannot write default config"),
            },
            Err(e) => warn!(error = %e, "Cannot serialize default config"),
        }
        config
    }

    /// Command-line flags win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(server) = &args.server {
            self.server = server.clone();
        }
        if let Some(volume) = args.volume {
            self.volume = volume;
        }
        if args.no_notifications {
            self.notifications = false;
        }
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            default_volume()
        };
    }
}
