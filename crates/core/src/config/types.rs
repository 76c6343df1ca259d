use std::path::PathBuf;

use serde::Deserialize;

/// On-disk configuration schema (`config.toml`).
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    /// Directory holding named templates. Optional; without it only stdin
    /// and explicit file paths work.
    #[serde(default)]
    pub templates_dir: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration after path expansion, ready for use.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub templates_dir: Option<PathBuf>,
    pub logging: LoggingConfig,
}
