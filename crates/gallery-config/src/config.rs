use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, Result};

/// Application's configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Connection target for the gallery database.
    /// Default: $GALLERY_ROOT/gallery.db
    pub database_url: String,

    /// Deployment-wide read-only mode. When true, request-scoped contexts
    /// refuse persistence writes; reads stay available.
    /// Default: false
    #[serde(default)]
    pub read_only: bool,
}

impl Config {
    pub fn default_config() -> Self {
        let gallery_root = std::env::var("GALLERY_ROOT")
            .unwrap_or_else(|_| format!("{}/gallery", xdg_data_home().display()));

        Self {
            database_url: format!("{gallery_root}/gallery.db"),
            read_only: false,
        }
    }

    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// carries an empty `database_url`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&raw)?;
        if config.database_url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(config)
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "Failed to load config from {}: {err}. Using defaults.",
                    path.as_ref().display()
                );
                Self::default_config()
            }
        }
    }

    /// Writes the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = toml::to_string_pretty(self)?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path.as_ref(), serialized)?;
        Ok(())
    }
}

/// Resolves the configuration file location: $GALLERY_CONFIG if set,
/// otherwise the XDG config directory.
pub fn config_path() -> PathBuf {
    match std::env::var("GALLERY_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("gallery").join("config.toml"),
    }
}

fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"))
}

fn home_dir() -> PathBuf {
    std::env::var("HOME").map(PathBuf::from).unwrap_or_default()
}
