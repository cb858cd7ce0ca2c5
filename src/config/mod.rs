use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEFAULT_CONFIG_FILE: &str = "grammar-tutor.toml";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub oracle: OracleConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            oracle: OracleConfig::default(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "grammar-t5".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, never failing: defaults, then the TOML file if
    /// present, then environment overrides.
    pub fn load() -> Self {
        let path = std::env::var("GRAMMAR_TUTOR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::load_from(&path);

        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring unparseable PORT value: {}", port),
            }
        }
        if let Ok(url) = std::env::var("ORACLE_URL") {
            config.oracle.base_url = url;
        }
        if let Ok(model) = std::env::var("ORACLE_MODEL") {
            config.oracle.model = model;
        }

        config
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match toml_edit::de::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}, using defaults: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
