use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;

use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("failed to expand path: {0}")]
    Expand(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config from `config_path`, or from the default location.
    ///
    /// An explicit path that does not exist is an error. A missing file at
    /// the default location is not; everything has a usable default.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let (path, explicit) = match config_path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            return Ok(ResolvedConfig::default());
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let templates_dir = match cf.templates_dir.as_deref() {
            Some(dir) => Some(expand_path(dir)?),
            None => None,
        };

        let logging = match cf.logging.file {
            Some(ref file) => LoggingConfig {
                level: cf.logging.level.clone(),
                file_level: cf.logging.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            },
            None => cf.logging,
        };

        Ok(ResolvedConfig { templates_dir, logging })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("fillin").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("fillin").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|e| ConfigError::Expand(e.to_string()))?;
    Ok(PathBuf::from(expanded.to_string()))
}
