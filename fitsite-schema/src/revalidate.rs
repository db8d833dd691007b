use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RevalidateRequest {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevalidateResponse {
    pub revalidated: bool,
    /// Unix time in milliseconds.
    pub now: i64,
    pub message: String,
}

impl RevalidateResponse {
    pub fn for_tag(tag: &str, now: i64) -> Self {
        Self {
            revalidated: true,
            now,
            message: format!("Successfully revalidated tag: {tag}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevalidateErrorBody {
    pub message: String,
    pub error: String,
}
