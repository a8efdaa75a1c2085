mod common;

use axum::http::StatusCode;
use common::{TestApp, seeded_store};
use serde_json::{Value, json};

fn zone_ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|z| z["zone_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_admin_lists_every_zone() {
    let app = TestApp::new(seeded_store());

    let (status, body) = app.get("/api/zones", Some(&app.admin_token())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(zone_ids(&body), vec![10, 11, 20]);
}

#[tokio::test]
async fn test_user_lists_assigned_zones() {
    let store = seeded_store();
    store.grant_zones(6, &[20, 11]);
    let app = TestApp::new(store);

    let (status, body) = app.get("/api/zones", Some(&app.token(6, None))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(zone_ids(&body), vec![11, 20]);
    assert_eq!(body[1], json!({"zone_id": 20, "zone_name": "Market", "city_id": 2}));
}

#[tokio::test]
async fn test_user_without_zones_lists_nothing() {
    let app = TestApp::new(seeded_store());

    let (status, body) = app.get("/api/zones", Some(&app.token(6, None))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_anonymous_caller_lists_nothing() {
    let app = TestApp::new(seeded_store());

    let (status, body) = app.get("/api/zones", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_zone_scope_is_resolved_per_request() {
    let store = seeded_store();
    store.grant_zones(6, &[10]);
    let app = TestApp::new(store.clone());
    let token = app.token(6, None);

    let (_, body) = app.get("/api/zones", Some(&token)).await;
    assert_eq!(zone_ids(&body), vec![10]);

    store.grant_zones(6, &[20]);
    let (_, body) = app.get("/api/zones", Some(&token)).await;
    assert_eq!(zone_ids(&body), vec![10, 20]);
    assert_eq!(store.zone_queries(), 2);
}

#[tokio::test]
async fn test_zone_resolution_failure_is_server_error() {
    let store = seeded_store();
    store.set_failing(true);
    let app = TestApp::new(store);

    let (status, body) = app.get("/api/zones", Some(&app.token(6, None))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Unable to resolve zone access scope."}));
}

#[tokio::test]
async fn test_get_zone_inside_scope() {
    let store = seeded_store();
    store.grant_zones(6, &[11]);
    let app = TestApp::new(store);

    let (status, body) = app.get("/api/zones/11", Some(&app.token(6, None))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zone_name"], json!("Harbour"));
}

#[tokio::test]
async fn test_get_zone_outside_scope_is_forbidden() {
    let store = seeded_store();
    store.grant_zones(6, &[11]);
    let app = TestApp::new(store);

    let (status, body) = app.get("/api/zones/20", Some(&app.token(6, None))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"error": "Forbidden: zone outside your access scope"}));
}

#[tokio::test]
async fn test_admin_get_missing_zone_is_not_found() {
    let app = TestApp::new(seeded_store());

    let (status, _) = app.get("/api/zones/99", Some(&app.admin_token())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
