#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use fitsite::config::Config;
use fitsite::server::router::{SiteState, site_router};
use serde_json::Value;
use sqlx::SqlitePool;
use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const REVALIDATE_TOKEN: &str = "test-revalidate-secret";

pub struct TestSite {
    pub app: Router,
    pub state: SiteState,
    pub database_url: String,
    pub path: PathBuf,
}

impl TestSite {
    /// Separate pool on the same database file, for edits that bypass the service.
    pub async fn raw_pool(&self) -> SqlitePool {
        SqlitePool::connect(&self.database_url)
            .await
            .expect("failed to open raw pool")
    }

    pub async fn cleanup(self) {
        let _ = tokio::fs::remove_file(&self.path).await;
        let _ = tokio::fs::remove_file(self.path.with_extension("sqlite-wal")).await;
        let _ = tokio::fs::remove_file(self.path.with_extension("sqlite-shm")).await;
    }
}

pub fn temp_database(label: &str) -> (String, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "fitsite-{label}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    (format!("sqlite:{}", temp_path.display()), temp_path)
}

pub fn test_config() -> Config {
    let mut cfg = Config::default();
    cfg.basic.revalidate_token = REVALIDATE_TOKEN.to_string();
    cfg.storage.account_id = "acct".to_string();
    cfg.storage.access_key_id = "AKIDEXAMPLE".to_string();
    cfg.storage.secret_access_key = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string();
    cfg.storage.bucket = "site-media".to_string();
    cfg
}

pub async fn spawn_site(label: &str, cfg: Config) -> TestSite {
    let (database_url, path) = temp_database(label);
    let db = fitsite::db::spawn(&database_url, cfg.basic.seed_content).await;
    let state = SiteState::new(db, &cfg).expect("test config should build site state");
    let app = site_router(state.clone());
    TestSite {
        app,
        state,
        database_url,
        path,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&body).into_owned())
        })
    };
    (status, value)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn json_request(method: &str, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .expect("failed to build request")
}

pub fn strings(value: &Value, field: &str) -> Vec<String> {
    value
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|row| row[field].as_str().unwrap_or_default().to_string())
        .collect()
}
