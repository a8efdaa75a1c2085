//! In-memory [`AccessStore`] for tests and local tooling.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use geogate_models::{City, PermissionGrantRow, Zone, ZoneAccess};

use crate::{AccessStore, StoreError};

#[derive(Debug, Default)]
struct Grants {
    role_permissions: HashMap<i64, Vec<(String, String)>>,
    direct_permissions: HashMap<i64, Vec<(String, String, Option<i32>)>>,
    city_access: HashMap<i64, Vec<i64>>,
    zone_access: HashMap<i64, Vec<i64>>,
    cities: Vec<City>,
    zones: Vec<Zone>,
}

/// Store backed by plain collections, with query counters and failure injection.
#[derive(Debug, Default)]
pub struct InMemoryAccessStore {
    grants: Mutex<Grants>,
    permission_queries: AtomicUsize,
    city_queries: AtomicUsize,
    zone_queries: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryAccessStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn grants(&self) -> MutexGuard<'_, Grants> {
        self.grants.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }

    pub fn with_city(self, id: i32, name: &str) -> Self {
        self.grants().cities.push(City {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn with_zone(self, id: i32, name: &str, city_id: Option<i32>) -> Self {
        self.grants().zones.push(Zone {
            id,
            name: name.to_string(),
            city_id,
        });
        self
    }

    /// Permission inherited through one of the user's roles.
    pub fn grant_role_permission(&self, user_id: i64, module: &str, action: &str) {
        self.grants()
            .role_permissions
            .entry(user_id)
            .or_default()
            .push((module.to_string(), action.to_string()));
    }

    /// Permission assigned directly to the user, optionally restricted to one city.
    pub fn grant_permission(&self, user_id: i64, module: &str, action: &str, city_id: Option<i32>) {
        self.grants()
            .direct_permissions
            .entry(user_id)
            .or_default()
            .push((module.to_string(), action.to_string(), city_id));
    }

    pub fn revoke_permissions(&self, user_id: i64) {
        let mut grants = self.grants();
        grants.role_permissions.remove(&user_id);
        grants.direct_permissions.remove(&user_id);
    }

    pub fn grant_zones(&self, user_id: i64, zone_ids: &[i64]) {
        self.grants()
            .zone_access
            .entry(user_id)
            .or_default()
            .extend_from_slice(zone_ids);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn permission_queries(&self) -> usize {
        self.permission_queries.load(Ordering::SeqCst)
    }

    pub fn city_queries(&self) -> usize {
        self.city_queries.load(Ordering::SeqCst)
    }

    pub fn zone_queries(&self) -> usize {
        self.zone_queries.load(Ordering::SeqCst)
    }

    fn sorted_cities<F>(&self, keep: F) -> Vec<City>
    where
        F: Fn(&City) -> bool,
    {
        let mut cities: Vec<City> = self.grants().cities.iter().filter(|c| keep(c)).cloned().collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        cities
    }
}

#[async_trait]
impl AccessStore for InMemoryAccessStore {
    async fn permission_grants(&self, user_id: i64) -> Result<Vec<PermissionGrantRow>, StoreError> {
        self.permission_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let grants = self.grants();
        let inherited = grants
            .role_permissions
            .get(&user_id)
            .into_iter()
            .flatten()
            .map(|(module, action)| PermissionGrantRow::inherited(module, action));
        let direct = grants
            .direct_permissions
            .get(&user_id)
            .into_iter()
            .flatten()
            .map(|(module, action, city)| PermissionGrantRow::new(module, action, *city));

        Ok(inherited.chain(direct).collect())
    }

    async fn city_ids(&self, user_id: i64) -> Result<Vec<i64>, StoreError> {
        self.city_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self
            .grants()
            .city_access
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn granted_cities(&self, user_id: i64) -> Result<Vec<City>, StoreError> {
        self.city_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let granted: BTreeSet<i64> = self
            .grants()
            .city_access
            .get(&user_id)
            .into_iter()
            .flatten()
            .copied()
            .collect();
        Ok(self.sorted_cities(|c| granted.contains(&i64::from(c.id))))
    }

    async fn all_cities(&self) -> Result<Vec<City>, StoreError> {
        self.city_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self.sorted_cities(|_| true))
    }

    async fn zone_ids(&self, user_id: i64) -> Result<Vec<i64>, StoreError> {
        self.zone_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self
            .grants()
            .zone_access
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_city_grants(
        &self,
        user_id: i64,
        city_ids: &[i64],
        _granted_by: Option<i64>,
    ) -> Result<(), StoreError> {
        self.check_available()?;

        let mut grants = self.grants();
        grants.city_access.remove(&user_id);
        if !city_ids.is_empty() {
            let mut unique: Vec<i64> = Vec::with_capacity(city_ids.len());
            for id in city_ids {
                if !unique.contains(id) {
                    unique.push(*id);
                }
            }
            grants.city_access.insert(user_id, unique);
        }
        Ok(())
    }

    async fn cities_in_scope(&self, filter: Option<&[i64]>) -> Result<Vec<City>, StoreError> {
        self.check_available()?;

        Ok(match filter {
            None => self.sorted_cities(|_| true),
            Some(ids) => self.sorted_cities(|c| ids.contains(&i64::from(c.id))),
        })
    }

    async fn zones_in_scope(&self, scope: &ZoneAccess) -> Result<Vec<Zone>, StoreError> {
        self.check_available()?;

        let mut zones: Vec<Zone> = self
            .grants()
            .zones
            .iter()
            .filter(|z| scope.all || scope.ids.contains(&i64::from(z.id)))
            .cloned()
            .collect();
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permission_grants_lists_role_rows_first() {
        let store = InMemoryAccessStore::new();
        store.grant_permission(1, "reports", "view", Some(5));
        store.grant_role_permission(1, "reports", "view");

        let rows = store.permission_grants(1).await.unwrap();
        assert_eq!(
            rows,
            vec![
                PermissionGrantRow::inherited("reports", "view"),
                PermissionGrantRow::new("reports", "view", Some(5)),
            ]
        );
        assert_eq!(store.permission_queries(), 1);
    }

    #[tokio::test]
    async fn test_replace_city_grants_is_delete_then_insert() {
        let store = InMemoryAccessStore::new();
        store.replace_city_grants(1, &[1, 2, 2], None).await.unwrap();
        assert_eq!(store.city_ids(1).await.unwrap(), vec![1, 2]);

        store.replace_city_grants(1, &[], None).await.unwrap();
        assert!(store.city_ids(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_errors() {
        let store = InMemoryAccessStore::new();
        store.set_failing(true);
        assert!(matches!(
            store.permission_grants(1).await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_cities_in_scope_filters_and_sorts() {
        let store = InMemoryAccessStore::new()
            .with_city(2, "Zaria")
            .with_city(1, "Abuja")
            .with_city(3, "Kano");

        let all = store.cities_in_scope(None).await.unwrap();
        assert_eq!(
            all.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Abuja", "Kano", "Zaria"]
        );

        let some = store.cities_in_scope(Some(&[2, 3])).await.unwrap();
        assert_eq!(some.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3, 2]);

        assert!(store.cities_in_scope(Some(&[])).await.unwrap().is_empty());
    }
}
