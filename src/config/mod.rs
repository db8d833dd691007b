mod basic;
mod cache;
mod storage;

pub use basic::BasicConfig;
pub use cache::CacheConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Object storage used for presigned uploads (see `storage` table in config.toml).
    #[serde(default)]
    pub storage: StorageConfig,

    /// Tagged read cache (see `cache` table in config.toml).
    #[serde(default)]
    pub cache: CacheConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "FITSITE_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `FITSITE_`-prefixed environment variables (`__` separates tables,
    /// e.g. `FITSITE_BASIC__REVALIDATE_TOKEN`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration without validating required fields.
    pub fn from_sources() -> Self {
        Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration: {err}"))
    }

    /// Loads configuration and validates required fields. Binaries should use this one.
    pub fn load() -> Self {
        let cfg = Self::from_sources();
        if let Err(problems) = cfg.validate() {
            panic!("invalid configuration: {}", problems.join("; "));
        }
        cfg
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        if self.basic.revalidate_token.trim().is_empty() {
            problems.push("basic.revalidate_token must be set and non-empty".to_string());
        }
        problems.extend(self.storage.missing_fields().into_iter().map(|field| {
            format!("storage.{field} must be set and non-empty")
        }));

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reports_missing_secrets() {
        let problems = Config::default().validate().unwrap_err();
        assert!(problems.iter().any(|p| p.contains("revalidate_token")));
        assert!(problems.iter().any(|p| p.contains("storage.bucket")));
    }

    #[test]
    fn complete_config_validates() {
        let mut cfg = Config::default();
        cfg.basic.revalidate_token = "s3cret".to_string();
        cfg.storage.account_id = "acct".to_string();
        cfg.storage.access_key_id = "AKID".to_string();
        cfg.storage.secret_access_key = "SECRET".to_string();
        cfg.storage.bucket = "site-media".to_string();
        assert!(cfg.validate().is_ok());
    }
}
