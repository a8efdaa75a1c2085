use geogate_access::AccessEngine;
use geogate_core::AppError;
use geogate_models::{AccessSummary, Actor, CacheGenerations};
use tracing::instrument;

pub struct AccessService;

impl AccessService {
    #[instrument(skip(engine))]
    pub async fn summary(engine: &AccessEngine, actor: &Actor) -> Result<AccessSummary, AppError> {
        Ok(engine.summarize(actor).await?)
    }

    /// Drops every cached bundle and city record so grant changes made outside this
    /// process become visible.
    pub fn invalidate(engine: &AccessEngine) -> CacheGenerations {
        engine.invalidate_permission_cache();
        CacheGenerations {
            permission_generation: engine.permission_generation(),
            city_generation: engine.city_generation(),
        }
    }
}
