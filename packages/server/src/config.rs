use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::UploadConfig;

/// Database connection settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Connection URL. Default: "sqlite://mentoria.db?mode=rwc".
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Default: 10.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Default: 1.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_database_url() -> String {
    "sqlite://mentoria.db?mode=rwc".into()
}
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    1
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

/// Material suggestion tuning.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SuggestionConfig {
    /// Maximum suggestions for a user with interest areas. Default: 20.
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
    /// Number of recent materials returned to a user without interest areas. Default: 10.
    #[serde(default = "default_recent_fallback")]
    pub recent_fallback: usize,
}

fn default_suggestion_limit() -> usize {
    20
}
fn default_recent_fallback() -> usize {
    10
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            limit: default_suggestion_limit(),
            recent_fallback: default_recent_fallback(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub suggestion: SuggestionConfig,
}

impl AppConfig {
    /// Load from `MENTORIA_CONFIG` (default `config/config`) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MENTORIA_CONFIG").unwrap_or_else(|_| "config/config".to_string());
        Self::load_from(&config_path)
    }

    /// Load from an optional config file, overridden by `MENTORIA__*` variables
    /// (e.g. `MENTORIA__UPLOAD__MAX_BYTES`).
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("MENTORIA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_extensions")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.upload.validate()?;
        if self.database.url.trim().is_empty() {
            return Err("database.url must not be empty".into());
        }
        if self.database.min_connections > self.database.max_connections {
            return Err("database.min_connections must not exceed max_connections".into());
        }
        if self.suggestion.limit == 0 {
            return Err("suggestion.limit must be greater than 0".into());
        }
        Ok(())
    }
}
