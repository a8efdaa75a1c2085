use std::collections::BTreeMap;
use std::sync::Arc;

use geogate_config::AccessConfig;
use geogate_core::{PermissionKey, Scope};
use geogate_db::{AccessStore, StoreError};
use geogate_models::{AccessSummary, Actor, CityAccess, ZoneAccess};
use metrics::counter;
use tracing::{debug, info, instrument};

use crate::{CityAccessResolver, Decision, PermissionBundle, PermissionCache, ZoneAccessResolver};

/// Owns the permission and city caches and runs the authorization procedure.
///
/// One engine is built at startup and shared through `Arc`.
pub struct AccessEngine {
    store: Arc<dyn AccessStore>,
    config: AccessConfig,
    permissions: PermissionCache,
    cities: CityAccessResolver,
    zones: ZoneAccessResolver,
}

impl std::fmt::Debug for AccessEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessEngine")
            .field("config", &self.config)
            .field("permission_generation", &self.permissions.generation())
            .field("city_generation", &self.cities.generation())
            .finish_non_exhaustive()
    }
}

impl AccessEngine {
    pub fn new(store: Arc<dyn AccessStore>, config: AccessConfig) -> Self {
        Self {
            store,
            config,
            permissions: PermissionCache::new(),
            cities: CityAccessResolver::new(),
            zones: ZoneAccessResolver::new(),
        }
    }

    pub fn store(&self) -> &dyn AccessStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub fn is_admin(&self, actor: &Actor) -> bool {
        self.config.is_admin(actor.role())
    }

    pub fn permission_generation(&self) -> u64 {
        self.permissions.generation()
    }

    pub fn city_generation(&self) -> u64 {
        self.cities.generation()
    }

    /// The actor's permission bundle for the current generation.
    pub async fn resolve_permissions(&self, user_id: i64) -> Result<Arc<PermissionBundle>, StoreError> {
        self.permissions.resolve(self.store(), user_id).await
    }

    /// Base city scope. With `include_cities` the city rows are attached and the cache
    /// is bypassed.
    pub async fn fetch_city_access(
        &self,
        actor: &Actor,
        include_cities: bool,
    ) -> Result<Arc<CityAccess>, StoreError> {
        if self.is_admin(actor) {
            return self.cities.fetch_admin(self.store(), include_cities).await;
        }
        self.cities.fetch(self.store(), actor.id, include_cities).await
    }

    /// Zone scope. A missing actor gets no zones; admins get every zone.
    pub async fn fetch_zone_access(&self, actor: Option<&Actor>) -> Result<ZoneAccess, StoreError> {
        match actor {
            None => Ok(ZoneAccess::default()),
            Some(actor) if self.is_admin(actor) => Ok(ZoneAccess::unrestricted()),
            Some(actor) => self.zones.fetch(self.store(), actor.id).await,
        }
    }

    /// Replaces a user's city grants, then invalidates cached city access.
    pub async fn sync_city_access(
        &self,
        user_id: i64,
        city_ids: &[i64],
        granted_by: Option<i64>,
    ) -> Result<Vec<i64>, StoreError> {
        self.cities.sync(self.store(), user_id, city_ids, granted_by).await
    }

    /// Drops every cached permission bundle and every cached city access record.
    ///
    /// Call after any grant or revoke.
    pub fn invalidate_permission_cache(&self) {
        let permission_generation = self.permissions.invalidate();
        let city_generation = self.cities.invalidate();
        info!(
            permission_generation,
            city_generation, "Permission cache invalidated"
        );
    }

    /// Everything the engine knows about `actor`: granted keys, the effective city
    /// scope of each key, the base city scope and the zone scope.
    pub async fn summarize(&self, actor: &Actor) -> Result<AccessSummary, StoreError> {
        let bundle = self.resolve_permissions(actor.id).await?;
        let base = self.fetch_city_access(actor, false).await?.to_scope();
        let zone_access = self.fetch_zone_access(Some(actor)).await?;

        let mut permissions: Vec<String> = bundle.keys().map(|k| k.to_string()).collect();
        permissions.sort();

        let city_scopes = bundle
            .city_scopes()
            .map(|(key, scope)| (key.to_string(), base.combine(scope)))
            .collect::<BTreeMap<_, _>>();

        Ok(AccessSummary {
            actor: actor.clone(),
            admin: self.is_admin(actor),
            permissions,
            city_scopes,
            base_city_scope: base,
            zone_access,
        })
    }

    /// Decides whether `actor` may perform `module:action`.
    ///
    /// Store failures are returned as errors so callers fail closed.
    #[instrument(skip(self, actor), fields(user_id = actor.map(|a| a.id)))]
    pub async fn authorize(
        &self,
        actor: Option<&Actor>,
        module: &str,
        action: &str,
    ) -> Result<Decision, StoreError> {
        let required = PermissionKey::new(module, action);

        let Some(actor) = actor else {
            record_decision("unauthenticated");
            return Ok(Decision::Unauthenticated);
        };

        if self.is_admin(actor) {
            record_decision("admin");
            return Ok(Decision::Granted {
                key: required,
                scope: Scope::unrestricted(),
            });
        }

        let bundle = self.resolve_permissions(actor.id).await?;
        let candidates = PermissionKey::candidates(module, action);

        let Some(matched) = bundle.first_granted(&candidates) else {
            debug!(permission = %required, "Missing permission");
            record_decision("forbidden");
            return Ok(Decision::Forbidden { required });
        };

        let base = self.fetch_city_access(actor, false).await?.to_scope();
        let scope = base.combine(&bundle.city_scope(matched));

        debug!(
            permission = %required,
            matched = %matched,
            all = scope.all,
            cities = scope.ids.len(),
            "Permission granted"
        );
        record_decision("granted");
        Ok(Decision::Granted {
            key: matched.clone(),
            scope,
        })
    }
}

fn record_decision(outcome: &'static str) {
    counter!("authorization_decisions_total", "outcome" => outcome).increment(1);
}
