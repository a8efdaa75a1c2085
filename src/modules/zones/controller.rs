use axum::{
    Json,
    extract::{Path, State},
};
use geogate_core::AppError;
use geogate_models::Zone;
use tracing::instrument;

use crate::middleware::zone::ZoneScope;
use crate::modules::zones::service::ZoneService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/zones",
    responses(
        (status = 200, description = "Zones inside the caller's zone scope", body = Vec<Zone>),
        (status = 401, description = "Invalid token"),
        (status = 500, description = "Unable to resolve zone access scope")
    ),
    tag = "Zones",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, scope))]
pub async fn get_zones(
    State(state): State<AppState>,
    ZoneScope(scope): ZoneScope,
) -> Result<Json<Vec<Zone>>, AppError> {
    // no scope attached means the layer did not run; list nothing
    let scope = scope.unwrap_or_default();
    let zones = ZoneService::list_zones(&state.engine, &scope).await?;
    Ok(Json(zones))
}

#[utoipa::path(
    get,
    path = "/api/zones/{id}",
    params(
        ("id" = i64, Path, description = "Zone ID")
    ),
    responses(
        (status = 200, description = "Zone details", body = Zone),
        (status = 403, description = "Zone outside the caller's zone scope"),
        (status = 404, description = "Zone not found"),
        (status = 500, description = "Unable to resolve zone access scope")
    ),
    tag = "Zones",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, scope))]
pub async fn get_zone_by_id(
    State(state): State<AppState>,
    ZoneScope(scope): ZoneScope,
    Path(id): Path<i64>,
) -> Result<Json<Zone>, AppError> {
    let scope = scope.unwrap_or_default();
    let zone = ZoneService::get_zone(&state.engine, &scope, id).await?;
    Ok(Json(zone))
}
