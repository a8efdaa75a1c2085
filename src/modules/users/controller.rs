use axum::{
    Json,
    extract::{Path, State},
};
use geogate_core::AppError;
use geogate_models::{AllowedCitiesResponse, SyncCityAccessDto, SyncCityAccessResponse};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserAccessService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/users/allowed-cities",
    responses(
        (status = 200, description = "Cities the caller may access", body = AllowedCitiesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No city access assigned")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_allowed_cities(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<AllowedCitiesResponse>, AppError> {
    let response = UserAccessService::allowed_cities(&state.engine, &actor).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}/cities",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = SyncCityAccessDto,
    responses(
        (status = 200, description = "City grants replaced", body = SyncCityAccessResponse),
        (status = 400, description = "Invalid user id or body"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires users:write permission")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn sync_user_cities(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(user_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<SyncCityAccessDto>,
) -> Result<Json<SyncCityAccessResponse>, AppError> {
    let response = UserAccessService::sync_city_access(&state.engine, user_id, dto, &actor).await?;
    Ok(Json(response))
}
