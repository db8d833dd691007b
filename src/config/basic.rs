use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr};

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `3000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite.
    /// TOML: `basic.database_url`. Default: `sqlite://fitsite.db`.
    #[serde(default)]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Shared secret expected by `POST /api/revalidate` (required, non-empty).
    /// TOML: `basic.revalidate_token`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub revalidate_token: String,

    /// Key guarding the admin API. Empty leaves the admin API open.
    /// TOML: `basic.admin_key`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub admin_key: String,

    /// Seed empty content tables with the default homepage content on startup.
    /// TOML: `basic.seed_content`. Default: `true`.
    #[serde(default = "default_seed_content")]
    pub seed_content: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: "sqlite://fitsite.db".to_string(),
            loglevel: "info".to_string(),
            // No insecure default. `Config::load()` enforces non-empty.
            revalidate_token: String::new(),
            admin_key: String::new(),
            seed_content: default_seed_content(),
        }
    }
}

fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("expected a string or a number")),
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    3000
}

fn default_seed_content() -> bool {
    true
}
