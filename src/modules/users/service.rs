use anyhow::anyhow;
use geogate_access::AccessEngine;
use geogate_core::AppError;
use geogate_models::{Actor, AllowedCitiesResponse, SyncCityAccessDto, SyncCityAccessResponse};
use geogate_observability::track_city_access_synced;
use tracing::instrument;

pub struct UserAccessService;

impl UserAccessService {
    /// Cities the caller may pick from.
    ///
    /// Admins see every city. Anyone else needs at least one city grant.
    #[instrument(skip(engine))]
    pub async fn allowed_cities(
        engine: &AccessEngine,
        actor: &Actor,
    ) -> Result<AllowedCitiesResponse, AppError> {
        let access = engine.fetch_city_access(actor, true).await?;
        let cities = access.cities.clone().unwrap_or_default();

        if access.all {
            return Ok(AllowedCitiesResponse { all: true, cities });
        }

        if access.ids.is_empty() {
            return Err(AppError::forbidden(anyhow!(
                "No city access assigned. Please contact admin."
            )));
        }

        Ok(AllowedCitiesResponse { all: false, cities })
    }

    #[instrument(skip(engine, dto), fields(cities = dto.city_ids.len()))]
    pub async fn sync_city_access(
        engine: &AccessEngine,
        user_id: i64,
        dto: SyncCityAccessDto,
        granted_by: &Actor,
    ) -> Result<SyncCityAccessResponse, AppError> {
        if user_id <= 0 {
            return Err(AppError::bad_request(anyhow!("Invalid user id")));
        }

        let city_ids = engine
            .sync_city_access(user_id, &dto.city_ids, Some(granted_by.id))
            .await?;
        track_city_access_synced(city_ids.len());

        Ok(SyncCityAccessResponse { user_id, city_ids })
    }
}
