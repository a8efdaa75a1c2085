use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    routing::{get, put},
};

use crate::middleware::permission::require_permission;
use crate::state::AppState;

use super::controller::{get_allowed_cities, sync_user_cities};

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let managed = Router::new()
        .route("/{id}/cities", put(sync_user_cities))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |s: State<AppState>, req: Request, next: Next| {
                require_permission(s, req, next, "users", "write")
            },
        ));

    Router::new()
        .route("/allowed-cities", get(get_allowed_cities))
        .merge(managed)
}
