#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use geogate::router::init_router;
use geogate::state::AppState;
use geogate_access::AccessEngine;
use geogate_auth::create_access_token;
use geogate_config::{AccessConfig, CorsConfig, JwtConfig};
use geogate_db::InMemoryAccessStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const ADMIN_ID: i64 = 1;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Store seeded with three cities and three zones.
pub fn seeded_store() -> Arc<InMemoryAccessStore> {
    Arc::new(
        InMemoryAccessStore::new()
            .with_city(1, "Accra")
            .with_city(2, "Kumasi")
            .with_city(3, "Tamale")
            .with_zone(10, "Airport", Some(1))
            .with_zone(11, "Harbour", Some(1))
            .with_zone(20, "Market", Some(2)),
    )
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryAccessStore>,
}

impl TestApp {
    pub fn new(store: Arc<InMemoryAccessStore>) -> Self {
        let engine = AccessEngine::new(store.clone(), AccessConfig::default());
        let state = AppState::new(engine, jwt_config(), CorsConfig::default());
        Self {
            router: init_router(state.clone()),
            state,
            store,
        }
    }

    pub fn token(&self, user_id: i64, role: Option<&str>) -> String {
        create_access_token(user_id, role, &jwt_config()).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token(ADMIN_ID, Some("admin"))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {}", token))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!(
                    "Non-JSON response. Status: {}, Body: {:?}",
                    status,
                    String::from_utf8_lossy(&bytes)
                )
            })
        };
        (status, body)
    }
}

pub fn city_ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["city_id"].as_i64().unwrap())
        .collect()
}
