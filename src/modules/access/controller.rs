use axum::{Json, extract::State};
use geogate_core::AppError;
use geogate_models::{AccessSummary, CacheGenerations};
use tracing::{info, instrument};

use crate::middleware::auth::AuthUser;
use crate::modules::access::service::AccessService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/access/me",
    responses(
        (status = 200, description = "Permissions and scopes resolved for the caller", body = AccessSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_access(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<AccessSummary>, AppError> {
    let summary = AccessService::summary(&state.engine, &actor).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/access/invalidate",
    responses(
        (status = 200, description = "Caches invalidated", body = CacheGenerations),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires permissions:write permission")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn invalidate_access_cache(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Json<CacheGenerations> {
    let generations = AccessService::invalidate(&state.engine);
    info!(user_id = actor.id, ?generations, "Access caches invalidated on request");
    Json(generations)
}
