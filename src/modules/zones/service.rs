use anyhow::anyhow;
use geogate_access::{AccessEngine, assert_zone_access};
use geogate_core::AppError;
use geogate_models::{Zone, ZoneAccess};
use tracing::instrument;

pub struct ZoneService;

impl ZoneService {
    #[instrument(skip(engine))]
    pub async fn list_zones(engine: &AccessEngine, scope: &ZoneAccess) -> Result<Vec<Zone>, AppError> {
        let zones = engine.store().zones_in_scope(scope).await?;
        Ok(zones)
    }

    /// A single zone, provided it lies inside `scope`.
    #[instrument(skip(engine))]
    pub async fn get_zone(
        engine: &AccessEngine,
        scope: &ZoneAccess,
        zone_id: i64,
    ) -> Result<Zone, AppError> {
        if !assert_zone_access(Some(scope), zone_id) {
            return Err(AppError::forbidden(anyhow!(
                "Forbidden: zone outside your access scope"
            )));
        }

        engine
            .store()
            .zones_in_scope(&ZoneAccess::restricted(vec![zone_id]))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(anyhow!("Zone not found")))
    }
}
