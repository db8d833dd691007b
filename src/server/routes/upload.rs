use crate::error::SiteError;
use crate::server::router::SiteState;
use crate::storage::{ObjectKey, ObjectKeyError};
use axum::{
    Json, Router, extract::State, extract::rejection::JsonRejection, routing::post,
};
use fitsite_schema::{UploadUrlRequest, UploadUrlResponse};
use tracing::info;

/// POST /api/r2-upload
///
/// Returns a presigned PUT URL and the object key the client should store.
/// The client must upload with the same `Content-Type` it asked for.
pub async fn upload_url_handler(
    State(state): State<SiteState>,
    payload: Result<Json<UploadUrlRequest>, JsonRejection>,
) -> Result<Json<UploadUrlResponse>, SiteError> {
    let Json(req) = payload?;

    let file_type = req
        .file_type_str()
        .filter(|t| !t.is_empty())
        .ok_or(ObjectKeyError::MissingFileType)?;

    let key = ObjectKey::generate(file_type, req.folder.as_deref(), &state.default_folder)?
        .to_string();
    let url = state.presigner.presign_put(&key, file_type);

    info!(
        key = %key,
        file_type = %file_type,
        expires_secs = state.presigner.expires().as_secs(),
        "upload url issued"
    );

    Ok(Json(UploadUrlResponse {
        url: url.to_string(),
        key,
    }))
}

pub fn router() -> Router<SiteState> {
    Router::new().route("/api/r2-upload", post(upload_url_handler))
}
