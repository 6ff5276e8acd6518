use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_FILE: &str = "database.json";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be an integer between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub db_file: PathBuf,
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_file: PathBuf::from(DEFAULT_DB_FILE),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }
}

impl Config {
    /// Reads `PORT`, `DB_FILE` and `PUBLIC_DIR`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(raw) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
        }
        if let Some(db_file) = lookup("DB_FILE") {
            config.db_file = PathBuf::from(db_file);
        }
        if let Some(public_dir) = lookup("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(public_dir);
        }

        Ok(config)
    }
}
