use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    routing::{get, post},
};

use crate::middleware::permission::require_permission;
use crate::state::AppState;

use super::controller::{get_my_access, invalidate_access_cache};

pub fn init_access_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/invalidate", post(invalidate_access_cache))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |s: State<AppState>, req: Request, next: Next| {
                require_permission(s, req, next, "permissions", "write")
            },
        ));

    Router::new().route("/me", get(get_my_access)).merge(admin)
}
