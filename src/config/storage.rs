use serde::{Deserialize, Serialize};
use url::Url;

/// S3-compatible object storage (Cloudflare R2 by default).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Account id; the default endpoint is `https://<account_id>.r2.cloudflarestorage.com`.
    #[serde(default)]
    pub account_id: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    #[serde(default)]
    pub bucket: String,

    /// Overrides the endpoint derived from `account_id` (any S3-compatible service).
    #[serde(default)]
    pub endpoint: Option<Url>,

    /// Signing region. R2 expects `auto`.
    #[serde(default = "default_region")]
    pub region: String,

    /// Public base URL objects are served from; image keys are joined onto it.
    #[serde(default)]
    pub public_url: Option<Url>,

    /// Lifetime of presigned upload URLs, in seconds.
    #[serde(default = "default_presign_ttl_secs")]
    pub presign_ttl_secs: u64,

    /// Folder used when an upload request names none.
    #[serde(default = "default_folder")]
    pub default_folder: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            bucket: String::new(),
            endpoint: None,
            region: default_region(),
            public_url: None,
            presign_ttl_secs: default_presign_ttl_secs(),
            default_folder: default_folder(),
        }
    }
}

impl StorageConfig {
    /// Names of required fields that are empty. `account_id` is only required
    /// when no explicit endpoint is configured.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.endpoint.is_none() && self.account_id.trim().is_empty() {
            missing.push("account_id");
        }
        if self.access_key_id.trim().is_empty() {
            missing.push("access_key_id");
        }
        if self.secret_access_key.trim().is_empty() {
            missing.push("secret_access_key");
        }
        if self.bucket.trim().is_empty() {
            missing.push("bucket");
        }
        missing
    }
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_presign_ttl_secs() -> u64 {
    3600
}

fn default_folder() -> String {
    "general".to_string()
}
