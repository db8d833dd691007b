use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/r2-upload`.
///
/// `fileType` is kept as a raw JSON value so a present-but-not-a-string value
/// can be told apart from a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UploadUrlRequest {
    #[serde(rename = "fileType", default)]
    pub file_type: Option<Value>,

    #[serde(default)]
    pub folder: Option<String>,
}

impl UploadUrlRequest {
    pub fn file_type_str(&self) -> Option<&str> {
        self.file_type.as_ref().and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UploadUrlResponse {
    pub url: String,
    /// Object key to persist alongside the content row.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_string_file_type_is_not_a_str() {
        let req: UploadUrlRequest = serde_json::from_str(r#"{"fileType": 42}"#).unwrap();
        assert!(req.file_type.is_some());
        assert_eq!(req.file_type_str(), None);
    }

    #[test]
    fn folder_is_optional() {
        let req: UploadUrlRequest =
            serde_json::from_str(r#"{"fileType": "image/png"}"#).unwrap();
        assert_eq!(req.file_type_str(), Some("image/png"));
        assert!(req.folder.is_none());
    }
}
