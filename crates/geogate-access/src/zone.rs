use geogate_db::{AccessStore, StoreError};
use geogate_models::ZoneAccess;
use tracing::instrument;

/// Resolves an actor's zone scope.
///
/// Unlike city access this is not cached: every call queries the store.
#[derive(Debug, Default)]
pub struct ZoneAccessResolver;

impl ZoneAccessResolver {
    pub fn new() -> Self {
        Self
    }

    /// Zone access of a non-admin user.
    #[instrument(skip(self, store))]
    pub async fn fetch(&self, store: &dyn AccessStore, user_id: i64) -> Result<ZoneAccess, StoreError> {
        let mut ids = store.zone_ids(user_id).await?;
        ids.sort_unstable();
        ids.dedup();
        Ok(ZoneAccess::restricted(ids))
    }
}

/// Whether `zone_id` falls inside `scope`. A missing scope imposes no restriction.
pub fn assert_zone_access(scope: Option<&ZoneAccess>, zone_id: i64) -> bool {
    match scope {
        None => true,
        Some(scope) if scope.all => true,
        Some(scope) => scope.ids.contains(&zone_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogate_db::InMemoryAccessStore;

    #[tokio::test]
    async fn test_fetch_is_never_cached() {
        let store = InMemoryAccessStore::new();
        store.grant_zones(1, &[3, 1, 3]);
        let resolver = ZoneAccessResolver::new();

        let first = resolver.fetch(&store, 1).await.unwrap();
        store.grant_zones(1, &[8]);
        let second = resolver.fetch(&store, 1).await.unwrap();

        assert_eq!(first, ZoneAccess::restricted(vec![1, 3]));
        assert_eq!(second, ZoneAccess::restricted(vec![1, 3, 8]));
        assert_eq!(store.zone_queries(), 2);
    }

    #[test]
    fn test_assert_zone_access() {
        assert!(assert_zone_access(None, 5));
        assert!(assert_zone_access(Some(&ZoneAccess::unrestricted()), 5));
        assert!(assert_zone_access(Some(&ZoneAccess::restricted(vec![5])), 5));
        assert!(!assert_zone_access(Some(&ZoneAccess::restricted(vec![4])), 5));
        assert!(!assert_zone_access(Some(&ZoneAccess::restricted(vec![])), 5));
    }
}
