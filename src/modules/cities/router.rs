use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    routing::get,
};

use crate::middleware::permission::require_permission;
use crate::state::AppState;

use super::controller::get_cities;

pub fn init_cities_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_cities))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |s: State<AppState>, req: Request, next: Next| {
                require_permission(s, req, next, "cities", "view")
            },
        ))
}
