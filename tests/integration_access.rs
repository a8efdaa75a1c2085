mod common;

use axum::http::StatusCode;
use common::{TestApp, seeded_store};
use geogate_db::AccessStore;
use serde_json::json;

#[tokio::test]
async fn test_me_reports_resolved_access() {
    let store = seeded_store();
    store.grant_role_permission(3, "reports", "view");
    store.grant_permission(3, "cities", "view", Some(2));
    store.replace_city_grants(3, &[1, 2], None).await.unwrap();
    store.grant_zones(3, &[20, 10]);
    let app = TestApp::new(store);

    let (status, body) = app.get("/api/access/me", Some(&app.token(3, Some("analyst")))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["actor"], json!({"id": 3, "role": "analyst"}));
    assert_eq!(body["admin"], json!(false));
    assert_eq!(body["permissions"], json!(["cities:view", "reports:view"]));
    assert_eq!(body["base_city_scope"], json!({"all": false, "ids": [1, 2]}));
    assert_eq!(body["city_scopes"]["cities:view"], json!({"all": false, "ids": [2]}));
    assert_eq!(body["zone_access"], json!({"all": false, "ids": [10, 20]}));
}

#[tokio::test]
async fn test_me_for_admin() {
    let app = TestApp::new(seeded_store());

    let (status, body) = app.get("/api/access/me", Some(&app.admin_token())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"], json!(true));
    assert_eq!(body["base_city_scope"]["all"], json!(true));
    assert_eq!(body["zone_access"]["all"], json!(true));
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new(seeded_store());

    let (status, _) = app.get("/api/access/me", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalidate_requires_permissions_write() {
    let app = TestApp::new(seeded_store());

    let (status, body) = app
        .send_json("POST", "/api/access/invalidate", &app.token(3, None), json!({}))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["permission"], json!("permissions:write"));
}

#[tokio::test]
async fn test_invalidate_makes_revokes_visible() {
    let store = seeded_store();
    store.grant_role_permission(3, "cities", "view");
    store.replace_city_grants(3, &[1], None).await.unwrap();
    store.grant_role_permission(4, "permissions", "write");
    let app = TestApp::new(store.clone());
    let token = app.token(3, None);

    let (status, _) = app.get("/api/cities", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    store.revoke_permissions(3);
    let (status, _) = app.get("/api/cities", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send_json("POST", "/api/access/invalidate", &app.token(4, None), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"permission_generation": 1, "city_generation": 1})
    );

    let (status, body) = app.get("/api/cities", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["permission"], json!("cities:view"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new(seeded_store());

    let (status, _) = app.get("/api/reports", Some(&app.admin_token())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
