use std::sync::Arc;

use geogate_cache::GenerationCache;
use geogate_db::{AccessStore, StoreError};
use geogate_models::CityAccess;
use tracing::{info, instrument};

/// Deduplicates city ids, keeping the first occurrence of each.
pub fn normalize_city_ids<I>(city_ids: I) -> Vec<i64>
where
    I: IntoIterator<Item = i64>,
{
    let mut normalized = Vec::new();
    for id in city_ids {
        if !normalized.contains(&id) {
            normalized.push(id);
        }
    }
    normalized
}

/// Resolves an actor's base city scope.
///
/// The plain lookup is cached per generation. Lookups that include city metadata
/// always go to the store.
#[derive(Debug)]
pub struct CityAccessResolver {
    records: GenerationCache<i64, CityAccess>,
}

impl CityAccessResolver {
    pub fn new() -> Self {
        Self {
            records: GenerationCache::new("city_access"),
        }
    }

    pub fn generation(&self) -> u64 {
        self.records.generation()
    }

    /// City access of a non-admin user.
    #[instrument(skip(self, store))]
    pub async fn fetch(
        &self,
        store: &dyn AccessStore,
        user_id: i64,
        include_cities: bool,
    ) -> Result<Arc<CityAccess>, StoreError> {
        if include_cities {
            let cities = store.granted_cities(user_id).await?;
            let ids = normalize_city_ids(cities.iter().map(|c| i64::from(c.id)));
            return Ok(Arc::new(CityAccess {
                all: false,
                ids,
                cities: Some(cities),
            }));
        }

        self.records
            .get_or_try_insert_with(user_id, move || async move {
                let ids = store.city_ids(user_id).await?;
                Ok(CityAccess::restricted(normalize_city_ids(ids)))
            })
            .await
    }

    /// City access of an admin: everything, optionally with the full city list.
    #[instrument(skip(self, store))]
    pub async fn fetch_admin(
        &self,
        store: &dyn AccessStore,
        include_cities: bool,
    ) -> Result<Arc<CityAccess>, StoreError> {
        if !include_cities {
            return Ok(Arc::new(CityAccess::unrestricted()));
        }

        let cities = store.all_cities().await?;
        let ids = normalize_city_ids(cities.iter().map(|c| i64::from(c.id)));
        Ok(Arc::new(CityAccess {
            all: true,
            ids,
            cities: Some(cities),
        }))
    }

    /// Replaces the user's city grants and invalidates the cache, even when
    /// `city_ids` is empty.
    #[instrument(skip(self, store))]
    pub async fn sync(
        &self,
        store: &dyn AccessStore,
        user_id: i64,
        city_ids: &[i64],
        granted_by: Option<i64>,
    ) -> Result<Vec<i64>, StoreError> {
        let ids = normalize_city_ids(city_ids.iter().copied());
        store.replace_city_grants(user_id, &ids, granted_by).await?;
        let generation = self.invalidate();

        info!(user_id, cities = ids.len(), generation, "City access synced");
        Ok(ids)
    }

    pub fn invalidate(&self) -> u64 {
        self.records.invalidate()
    }
}

impl Default for CityAccessResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogate_db::InMemoryAccessStore;

    #[test]
    fn test_normalize_city_ids_dedupes_in_order() {
        assert_eq!(normalize_city_ids([3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(normalize_city_ids(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_plain_lookup_is_cached() {
        let store = InMemoryAccessStore::new();
        store.replace_city_grants(1, &[4, 5], None).await.unwrap();
        let resolver = CityAccessResolver::new();

        let first = resolver.fetch(&store, 1, false).await.unwrap();
        let second = resolver.fetch(&store, 1, false).await.unwrap();

        assert_eq!(first.ids, vec![4, 5]);
        assert!(first.cities.is_none());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.city_queries(), 1);
    }

    #[tokio::test]
    async fn test_metadata_lookup_bypasses_cache() {
        let store = InMemoryAccessStore::new()
            .with_city(1, "Kano")
            .with_city(2, "Abuja");
        store.replace_city_grants(1, &[1, 2], None).await.unwrap();
        let resolver = CityAccessResolver::new();

        resolver.fetch(&store, 1, true).await.unwrap();
        let access = resolver.fetch(&store, 1, true).await.unwrap();

        assert_eq!(store.city_queries(), 2);
        assert_eq!(access.ids, vec![2, 1]);
        let names: Vec<_> = access
            .cities
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["Abuja", "Kano"]);
    }

    #[tokio::test]
    async fn test_admin_lookup() {
        let store = InMemoryAccessStore::new().with_city(9, "Ibadan");
        let resolver = CityAccessResolver::new();

        let plain = resolver.fetch_admin(&store, false).await.unwrap();
        assert!(plain.all);
        assert!(plain.ids.is_empty());
        assert_eq!(store.city_queries(), 0);

        let full = resolver.fetch_admin(&store, true).await.unwrap();
        assert!(full.all);
        assert_eq!(full.ids, vec![9]);
        assert_eq!(full.cities.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_sync_replaces_and_invalidates() {
        let store = InMemoryAccessStore::new();
        let resolver = CityAccessResolver::new();
        store.replace_city_grants(1, &[1], None).await.unwrap();

        let before = resolver.fetch(&store, 1, false).await.unwrap();
        assert_eq!(before.ids, vec![1]);

        let synced = resolver.sync(&store, 1, &[2, 3, 2], Some(99)).await.unwrap();
        assert_eq!(synced, vec![2, 3]);
        assert_eq!(resolver.generation(), 1);

        let after = resolver.fetch(&store, 1, false).await.unwrap();
        assert_eq!(after.ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_sync_with_no_ids_still_invalidates() {
        let store = InMemoryAccessStore::new();
        let resolver = CityAccessResolver::new();
        store.replace_city_grants(1, &[7], None).await.unwrap();
        resolver.fetch(&store, 1, false).await.unwrap();

        resolver.sync(&store, 1, &[], None).await.unwrap();

        assert_eq!(resolver.generation(), 1);
        assert!(resolver.fetch(&store, 1, false).await.unwrap().ids.is_empty());
    }
}
