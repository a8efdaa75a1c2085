use axum::{Json, extract::State};
use geogate_core::AppError;
use geogate_models::City;
use tracing::instrument;

use crate::middleware::permission::GrantedScopes;
use crate::modules::cities::service::CityService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "Cities inside the caller's city scope", body = Vec<City>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires cities:view permission"),
        (status = 500, description = "Permission check failed")
    ),
    tag = "Cities",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, scopes))]
pub async fn get_cities(
    State(state): State<AppState>,
    GrantedScopes(scopes): GrantedScopes,
) -> Result<Json<Vec<City>>, AppError> {
    let filter = scopes.effective_city_filter("cities", "view");
    let cities = CityService::list_cities(&state.engine, filter).await?;
    Ok(Json(cities))
}
