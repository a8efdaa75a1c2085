use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use geogate_core::Scope;
use geogate_models::{
    AccessSummary, Actor, AllowedCitiesResponse, CacheGenerations, City, SyncCityAccessDto,
    SyncCityAccessResponse, Zone, ZoneAccess,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::cities::controller::get_cities,
        crate::modules::zones::controller::get_zones,
        crate::modules::zones::controller::get_zone_by_id,
        crate::modules::users::controller::get_allowed_cities,
        crate::modules::users::controller::sync_user_cities,
        crate::modules::access::controller::get_my_access,
        crate::modules::access::controller::invalidate_access_cache,
    ),
    components(
        schemas(
            Actor,
            City,
            Zone,
            Scope,
            ZoneAccess,
            AllowedCitiesResponse,
            SyncCityAccessDto,
            SyncCityAccessResponse,
            AccessSummary,
            CacheGenerations,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Cities", description = "City listings filtered by the caller's city scope"),
        (name = "Zones", description = "Zone listings filtered by the caller's zone scope"),
        (name = "Users", description = "Per-user city access"),
        (name = "Access", description = "Resolved permissions and cache control")
    ),
    info(
        title = "Geogate API",
        version = "0.1.0",
        description = "Permission and city/zone scoped access control built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
