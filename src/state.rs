use std::sync::Arc;

use geogate_access::AccessEngine;
use geogate_config::{AccessConfig, CorsConfig, DatabaseConfig, JwtConfig};
use geogate_db::{PgAccessStore, init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: Arc<AccessEngine>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(engine: AccessEngine, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            jwt_config,
            cors_config,
        }
    }
}

/// Connects to Postgres, applies pending migrations and builds the shared state.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;

    let engine = AccessEngine::new(Arc::new(PgAccessStore::new(pool)), AccessConfig::from_env());

    Ok(AppState::new(
        engine,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
