use geogate_access::AccessEngine;
use geogate_core::AppError;
use geogate_models::City;
use tracing::instrument;

pub struct CityService;

impl CityService {
    /// Cities visible under `filter`: `None` lists every city, an empty filter none.
    #[instrument(skip(engine))]
    pub async fn list_cities(
        engine: &AccessEngine,
        filter: Option<Vec<i64>>,
    ) -> Result<Vec<City>, AppError> {
        if filter.as_ref().is_some_and(Vec::is_empty) {
            return Ok(Vec::new());
        }

        let cities = engine.store().cities_in_scope(filter.as_deref()).await?;
        Ok(cities)
    }
}
