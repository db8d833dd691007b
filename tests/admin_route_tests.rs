mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{get, send, spawn_site, strings, test_config};
use serde_json::{Value, json};

const ADMIN_KEY: &str = "admin-test-key";

fn admin(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_KEY}"))
        .header("content-type", "application/json");
    builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("failed to build request")
}

fn admin_config() -> fitsite::config::Config {
    let mut cfg = test_config();
    cfg.basic.admin_key = ADMIN_KEY.to_string();
    cfg
}

#[tokio::test]
async fn admin_routes_require_the_admin_key() {
    let site = spawn_site("admin-auth", admin_config()).await;

    let (status, body) = send(&site.app, get("/api/admin/content")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing admin key");

    let req = Request::builder()
        .uri("/api/admin/content")
        .header("x-admin-key", "wrong")
        .body(Body::empty())
        .expect("failed to build request");
    let (status, body) = send(&site.app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid admin key");

    let req = Request::builder()
        .uri("/api/admin/content")
        .header("x-admin-key", ADMIN_KEY)
        .body(Body::empty())
        .expect("failed to build request");
    let (status, _) = send(&site.app, req).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&site.app, admin("GET", "/api/admin/content", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["personalization"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["passes"][2]["features"].as_array().map(Vec::len), Some(3));

    site.cleanup().await;
}

#[tokio::test]
async fn admin_routes_are_open_without_a_configured_key() {
    let site = spawn_site("admin-open", test_config()).await;

    let (status, _) = send(&site.app, get("/api/admin/content")).await;
    assert_eq!(status, StatusCode::OK);

    site.cleanup().await;
}

#[tokio::test]
async fn personalization_update_is_partial_and_refreshes_home() {
    let site = spawn_site("admin-personalization", admin_config()).await;

    // Warm the cache.
    let (_, home) = send(&site.app, get("/api/home")).await;
    let before = home["personalization"][0].clone();
    let id = before["id"].as_str().expect("id present").to_string();

    let (status, body) = send(
        &site.app,
        admin(
            "PUT",
            &format!("/api/admin/personalization/{id}"),
            Some(json!({ "title": "Power", "image_key": "personalization/power.webp" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Power");
    assert_eq!(body["image_key"], "personalization/power.webp");
    assert_eq!(body["description"], before["description"]);

    let (_, home) = send(&site.app, get("/api/home")).await;
    assert_eq!(home["personalization"][0]["title"], "Power");

    let (status, _) = send(
        &site.app,
        admin(
            "PUT",
            "/api/admin/personalization/does-not-exist",
            Some(json!({ "title": "Ghost" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &site.app,
        admin(
            "PUT",
            &format!("/api/admin/personalization/{id}"),
            Some(json!({ "title": 7 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    site.cleanup().await;
}

#[tokio::test]
async fn membership_save_deletes_omitted_features_and_renumbers() {
    let site = spawn_site("admin-membership", admin_config()).await;

    let (_, home) = send(&site.app, get("/api/home")).await;
    assert_eq!(home["membership"]["features"].as_array().map(Vec::len), Some(5));

    let (_, content) = send(&site.app, admin("GET", "/api/admin/content", None)).await;
    let mut plans = content["membership"]["plans"].clone();
    plans[0]["price"] = json!("₹1299");
    let features = content["membership"]["features"]
        .as_array()
        .expect("features array")
        .clone();

    let save = json!({
        "plans": plans,
        "features": [
            { "id": features[1]["id"], "feature_text": "Customized Diet Plans" },
            { "id": features[0]["id"], "feature_text": features[0]["feature_text"] },
            { "id": "new-1700000000000", "feature_text": "Sauna Access" },
            { "feature_text": "  Free Parking  " },
        ],
    });
    let (status, body) = send(&site.app, admin("PUT", "/api/admin/membership", Some(save))).await;
    assert_eq!(status, StatusCode::OK);

    let saved = &body["features"];
    assert_eq!(
        strings(saved, "feature_text"),
        [
            "Customized Diet Plans",
            "Certified Trainers On-Floor",
            "Sauna Access",
            "Free Parking"
        ]
    );
    let orders: Vec<i64> = saved
        .as_array()
        .expect("features array")
        .iter()
        .filter_map(|f| f["sort_order"].as_i64())
        .collect();
    assert_eq!(orders, [1, 2, 3, 4]);
    assert_eq!(saved[0]["id"], features[1]["id"]);
    assert_ne!(saved[2]["id"], "new-1700000000000");
    assert_eq!(body["plans"][0]["price"], "₹1299");

    // Omitted features are gone from the store and the cached home page is fresh.
    let (_, rows) = send(&site.app, get("/api/data?table=membership_features")).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(4));
    let (_, home) = send(&site.app, get("/api/home")).await;
    assert_eq!(home["membership"]["features"].as_array().map(Vec::len), Some(4));
    assert_eq!(home["membership"]["plans"][0]["price"], "₹1299");

    site.cleanup().await;
}

#[tokio::test]
async fn pass_save_replaces_features_wholesale() {
    let site = spawn_site("admin-pass", admin_config()).await;

    let (_, home) = send(&site.app, get("/api/home")).await;
    let daily_id = home["passes"][0]["id"].as_str().expect("id").to_string();

    let (status, body) = send(
        &site.app,
        admin(
            "PUT",
            &format!("/api/admin/passes/{daily_id}"),
            Some(json!({
                "price": "₹249",
                "featured": true,
                "features": ["Full Gym Floor Access", "Steam Bath", " "],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pass_id"], "daily");
    assert_eq!(body["price"], "₹249");
    assert_eq!(body["title"], "Daily Pass");
    assert_eq!(body["featured"], true);
    assert_eq!(
        strings(&body["features"], "feature_text"),
        ["Full Gym Floor Access", "Steam Bath"]
    );
    assert_eq!(body["features"][1]["sort_order"], 2);

    let (_, home) = send(&site.app, get("/api/home")).await;
    assert_eq!(home["passes"][0]["features"].as_array().map(Vec::len), Some(2));
    assert_eq!(home["passes"][1]["features"].as_array().map(Vec::len), Some(4));

    let (_, rows) = send(&site.app, get("/api/data?table=pass_features")).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(2 + 4 + 3));

    let (status, _) = send(
        &site.app,
        admin(
            "PUT",
            "/api/admin/passes/does-not-exist",
            Some(json!({ "features": ["x"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    site.cleanup().await;
}

#[tokio::test]
async fn saves_without_feature_lists_are_rejected_and_keep_features() {
    let site = spawn_site("admin-missing-lists", admin_config()).await;

    let (_, content) = send(&site.app, admin("GET", "/api/admin/content", None)).await;
    let daily_id = content["passes"][0]["id"].as_str().expect("id").to_string();

    let (status, body) = send(
        &site.app,
        admin(
            "PUT",
            &format!("/api/admin/passes/{daily_id}"),
            Some(json!({ "title": "Day Pass" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&site.app, admin("PUT", "/api/admin/membership", Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &site.app,
        admin(
            "PUT",
            "/api/admin/membership",
            Some(json!({ "plans": content["membership"]["plans"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, content) = send(&site.app, admin("GET", "/api/admin/content", None)).await;
    assert_eq!(content["passes"][0]["title"], "Daily Pass");
    assert_eq!(content["passes"][0]["features"].as_array().map(Vec::len), Some(3));
    assert_eq!(content["membership"]["features"].as_array().map(Vec::len), Some(5));
    assert_eq!(content["membership"]["plans"].as_array().map(Vec::len), Some(4));

    site.cleanup().await;
}
