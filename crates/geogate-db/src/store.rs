use async_trait::async_trait;
use geogate_models::{City, PermissionGrantRow, Zone, ZoneAccess};

use crate::StoreError;

/// Grant queries the authorization engine is built on.
///
/// Implementations must return rows fresh from the underlying source; caching is the
/// caller's concern.
#[async_trait]
pub trait AccessStore: Send + Sync {
    /// Role-inherited grants (always with `city_id = None`) followed by direct grants.
    async fn permission_grants(&self, user_id: i64) -> Result<Vec<PermissionGrantRow>, StoreError>;

    /// City ids granted to the user.
    async fn city_ids(&self, user_id: i64) -> Result<Vec<i64>, StoreError>;

    /// Cities granted to the user, ordered by name.
    async fn granted_cities(&self, user_id: i64) -> Result<Vec<City>, StoreError>;

    /// Every city, ordered by name.
    async fn all_cities(&self) -> Result<Vec<City>, StoreError>;

    /// Zone ids granted to the user.
    async fn zone_ids(&self, user_id: i64) -> Result<Vec<i64>, StoreError>;

    /// Replaces the user's city grants with `city_ids`.
    async fn replace_city_grants(
        &self,
        user_id: i64,
        city_ids: &[i64],
        granted_by: Option<i64>,
    ) -> Result<(), StoreError>;

    /// Cities matching a city filter (`None` = all cities), ordered by name.
    async fn cities_in_scope(&self, filter: Option<&[i64]>) -> Result<Vec<City>, StoreError>;

    /// Zones visible under a zone scope, ordered by name.
    async fn zones_in_scope(&self, scope: &ZoneAccess) -> Result<Vec<Zone>, StoreError>;
}
