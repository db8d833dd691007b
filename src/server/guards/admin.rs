use crate::server::router::SiteState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use fitsite_schema::ApiErrorBody;
use subtle::ConstantTimeEq;

fn extract_admin_token(headers: &HeaderMap) -> Option<String> {
    if let Some(k) = headers.get("x-admin-key").and_then(|v| v.to_str().ok()) {
        return Some(k.to_string());
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// Admin routes guard. With no `basic.admin_key` configured the admin API is open.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdminKey;

impl FromRequestParts<SiteState> for RequireAdminKey {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SiteState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.admin_key.as_ref();
        if expected.is_empty() {
            return Ok(RequireAdminKey);
        }

        match extract_admin_token(&parts.headers) {
            Some(key) => {
                if key.as_bytes().ct_eq(expected.as_bytes()).into() {
                    Ok(RequireAdminKey)
                } else {
                    Err(AuthError::InvalidKey)
                }
            }
            None => Err(AuthError::MissingKey),
        }
    }
}

pub enum AuthError {
    MissingKey,
    InvalidKey,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let reason = match self {
            AuthError::MissingKey => "Missing admin key",
            AuthError::InvalidKey => "Invalid admin key",
        };
        (StatusCode::UNAUTHORIZED, Json(ApiErrorBody::new(reason))).into_response()
    }
}
