use std::sync::Arc;

use geogate_cache::GenerationCache;
use geogate_db::{AccessStore, StoreError};
use tracing::{debug, instrument};

use crate::PermissionBundle;

/// Per-actor permission bundles, memoized per cache generation.
#[derive(Debug)]
pub struct PermissionCache {
    bundles: GenerationCache<i64, PermissionBundle>,
}

impl PermissionCache {
    pub fn new() -> Self {
        Self {
            bundles: GenerationCache::new("permissions"),
        }
    }

    pub fn generation(&self) -> u64 {
        self.bundles.generation()
    }

    /// Returns the actor's bundle for the current generation, querying the store on a miss.
    #[instrument(skip(self, store))]
    pub async fn resolve(
        &self,
        store: &dyn AccessStore,
        user_id: i64,
    ) -> Result<Arc<PermissionBundle>, StoreError> {
        self.bundles
            .get_or_try_insert_with(user_id, move || async move {
                let rows = store.permission_grants(user_id).await?;
                let bundle = PermissionBundle::from_rows(&rows);
                debug!(
                    user_id,
                    rows = rows.len(),
                    keys = bundle.len(),
                    "Permission bundle built"
                );
                Ok(bundle)
            })
            .await
    }

    /// Starts a new generation. Callers go through
    /// `AccessEngine::invalidate_permission_cache`, which also drops city access.
    pub(crate) fn invalidate(&self) -> u64 {
        self.bundles.invalidate()
    }
}

impl Default for PermissionCache {
    fn default() -> Self {
        Self::new()
    }
}
