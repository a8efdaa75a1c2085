use axum::{Router, middleware, routing::get};

use crate::middleware::zone::attach_zone_scope;
use crate::state::AppState;

use super::controller::{get_zone_by_id, get_zones};

pub fn init_zones_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_zones))
        .route("/{id}", get(get_zone_by_id))
        .route_layer(middleware::from_fn_with_state(state.clone(), attach_zone_scope))
}
