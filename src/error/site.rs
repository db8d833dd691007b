use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fitsite_schema::ApiErrorBody;
use fitsite_tagcache::TagCacheError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

use crate::db::Table;
use crate::storage::{ObjectKeyError, PresignError};

#[derive(Debug, ThisError)]
pub enum SiteError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown column {column:?} for table {table}")]
    UnknownColumn { table: &'static str, column: String },

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    ObjectKey(#[from] ObjectKeyError),

    #[error("Presign error: {0}")]
    Presign(#[from] PresignError),

    #[error("Cache error: {0}")]
    Cache(#[from] TagCacheError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("expected {expected} rows, got {got} rows")]
    UnexpectedRows { expected: Table, got: Table },

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Task join error: {0}")]
    JoinError(String),
}

impl From<JsonRejection> for SiteError {
    fn from(rejection: JsonRejection) -> Self {
        SiteError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for SiteError {
    fn from(rejection: QueryRejection) -> Self {
        SiteError::InvalidRequest(rejection.body_text())
    }
}

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::UnknownTable(_)
            | SiteError::UnknownColumn { .. }
            | SiteError::InvalidRequest(_)
            | SiteError::ObjectKey(_) => StatusCode::BAD_REQUEST,
            SiteError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SiteError::NotFound(_) => StatusCode::NOT_FOUND,
            SiteError::Presign(_)
            | SiteError::Cache(_)
            | SiteError::DatabaseError(_)
            | SiteError::JsonError(_)
            | SiteError::UnexpectedRows { .. }
            | SiteError::RactorError(_)
            | SiteError::JoinError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the client. Internal failures are
    /// summarized; their details only go to the log.
    pub fn public_message(&self) -> String {
        match self {
            SiteError::Presign(_) => "Failed to generate presigned URL".to_string(),
            SiteError::Cache(_) => "Failed to update the content cache".to_string(),
            SiteError::DatabaseError(_)
            | SiteError::JsonError(_)
            | SiteError::UnexpectedRows { .. }
            | SiteError::RactorError(_)
            | SiteError::JoinError(_) => "Failed to read or write site content".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        } else {
            warn!(status = %status, error = %self, "request rejected");
        }
        (status, Json(ApiErrorBody::new(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_details_are_not_exposed() {
        let err = SiteError::DatabaseError(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("no rows"));
    }

    #[test]
    fn unknown_table_is_a_client_error() {
        let err = SiteError::UnknownTable("users".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "unknown table: users");
    }
}
