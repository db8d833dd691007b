use crate::error::SiteError;
use crate::server::router::SiteState;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use fitsite_schema::{RevalidateErrorBody, RevalidateRequest, RevalidateResponse};
use subtle::ConstantTimeEq;
use tracing::error;

fn secret_matches(expected: &str, given: Option<&str>) -> bool {
    match given {
        Some(given) if !expected.is_empty() => given.as_bytes().ct_eq(expected.as_bytes()).into(),
        _ => false,
    }
}

/// POST /api/revalidate
pub async fn revalidate_handler(
    State(state): State<SiteState>,
    payload: Result<Json<RevalidateRequest>, JsonRejection>,
) -> Result<Response, SiteError> {
    let Json(req) = payload?;

    if !secret_matches(&state.revalidate_token, req.secret.as_deref()) {
        return Err(SiteError::Unauthorized("Invalid secret"));
    }

    let tag = req
        .tag
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SiteError::InvalidRequest("tag is required".to_string()))?;

    match state.content.invalidate(tag) {
        Ok(_) => {
            let now = Utc::now().timestamp_millis();
            Ok(Json(RevalidateResponse::for_tag(tag, now)).into_response())
        }
        Err(e) => {
            error!(tag = %tag, error = %e, "revalidation failed");
            let body = RevalidateErrorBody {
                message: "Error revalidating".to_string(),
                error: e.to_string(),
            };
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
    }
}

pub fn router() -> Router<SiteState> {
    Router::new().route("/api/revalidate", post(revalidate_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_must_match_exactly() {
        assert!(secret_matches("s3cret", Some("s3cret")));
        assert!(!secret_matches("s3cret", Some("s3cre")));
        assert!(!secret_matches("s3cret", Some("S3CRET")));
        assert!(!secret_matches("s3cret", None));
    }

    #[test]
    fn empty_expected_secret_never_matches() {
        assert!(!secret_matches("", Some("")));
    }
}
