use rand::RngCore;
use std::fmt;
use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ObjectKeyError {
    #[error("fileType is required and must be a string")]
    MissingFileType,

    #[error("Invalid fileType format")]
    InvalidFileType,

    #[error("Invalid folder name: {0:?}")]
    InvalidFolder(String),
}

/// Bucket key of a new upload: `<folder>/<32 hex chars>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    folder: String,
    file_name: String,
}

impl ObjectKey {
    /// Builds a fresh, unguessable key for a file of MIME type `file_type`.
    /// A missing or blank `folder` falls back to `default_folder`.
    pub fn generate(
        file_type: &str,
        folder: Option<&str>,
        default_folder: &str,
    ) -> Result<Self, ObjectKeyError> {
        let extension = extension_for(file_type)?;
        let folder = match folder.map(str::trim).filter(|f| !f.is_empty()) {
            Some(folder) => normalize_folder(folder)?,
            None => normalize_folder(default_folder)?,
        };

        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        let file_name = format!("{}.{extension}", hex::encode(bytes));

        Ok(Self { folder, file_name })
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.folder, self.file_name)
    }
}

/// File extension taken from the MIME subtype (`image/jpeg` -> `jpeg`).
/// Parameters such as `; charset=utf-8` are ignored.
pub(crate) fn extension_for(file_type: &str) -> Result<String, ObjectKeyError> {
    if file_type.trim().is_empty() {
        return Err(ObjectKeyError::MissingFileType);
    }
    let essence = file_type.split(';').next().unwrap_or_default().trim();
    let subtype = essence
        .split('/')
        .nth(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ObjectKeyError::InvalidFileType)?;

    if !subtype
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return Err(ObjectKeyError::InvalidFileType);
    }
    Ok(subtype.to_ascii_lowercase())
}

fn normalize_folder(folder: &str) -> Result<String, ObjectKeyError> {
    let trimmed = folder.trim().trim_matches('/');
    let valid = !trimmed.is_empty()
        && trimmed.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        });

    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(ObjectKeyError::InvalidFolder(folder.to_string()))
    }
}
