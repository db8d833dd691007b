use crate::config::Config;
use crate::db::DbActorHandle;
use crate::error::SiteError;
use crate::server::guards::admin::RequireAdminKey;
use crate::server::routes::{admin, data, pages, revalidate, upload};
use crate::service::ContentService;
use crate::storage::Presigner;

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const MAX_BODY_BYTES: usize = 1024 * 1024;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct SiteState {
    pub content: ContentService,
    pub presigner: Arc<Presigner>,
    pub revalidate_token: Arc<str>,
    pub admin_key: Arc<str>,
    pub default_folder: Arc<str>,
}

impl SiteState {
    pub fn new(db: DbActorHandle, cfg: &Config) -> Result<Self, SiteError> {
        let presigner = Presigner::from_config(&cfg.storage)?;
        let content = ContentService::new(db, &cfg.cache, cfg.storage.public_url.clone());

        Ok(Self {
            content,
            presigner: Arc::new(presigner),
            revalidate_token: Arc::from(cfg.basic.revalidate_token.trim()),
            admin_key: Arc::from(cfg.basic.admin_key.trim()),
            default_folder: Arc::from(cfg.storage.default_folder.as_str()),
        })
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn healthz() -> &'static str {
    "ok"
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    // Always reflect `x-request-id`, even if the client didn't send one.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn site_router(state: SiteState) -> Router {
    let admin = admin::router().layer(middleware::from_extractor_with_state::<
        RequireAdminKey,
        _,
    >(state.clone()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any)
        .expose_headers([X_REQUEST_ID]);

    Router::new()
        .route("/healthz", get(healthz))
        .merge(data::router())
        .merge(pages::router())
        .merge(upload::router())
        .merge(revalidate::router())
        .merge(admin)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(middleware::from_fn(access_log))
}
