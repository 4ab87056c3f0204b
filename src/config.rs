//! Runtime configuration.
//!
//! Sources, later ones winning:
//! - built-in defaults (`Config::default`)
//! - `config.toml` in the working directory, if present
//! - environment variables prefixed with `KAKEIBO_` (e.g. `KAKEIBO_DATABASE_URL`)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::KakeiboError;

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "KAKEIBO_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Category names inserted at startup when missing.
    pub categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite://kakeibo.db".to_string(),
            loglevel: "info".to_string(),
            categories: [
                "Food",
                "Daily goods",
                "Transport",
                "Utilities",
                "Housing",
                "Medical",
                "Entertainment",
                "Other",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Config {
    /// Load from the default file location and the process environment.
    pub fn load() -> Result<Self, KakeiboError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(file: &Path) -> Result<Self, KakeiboError> {
        let cfg = Self::figment(file).extract()?;
        Ok(cfg)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
