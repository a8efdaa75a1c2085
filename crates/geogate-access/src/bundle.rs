use std::collections::{HashMap, HashSet};

use geogate_core::{PermissionKey, Scope};
use geogate_models::PermissionGrantRow;

/// Everything an actor is granted, with the city scope attached to each key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionBundle {
    granted: HashSet<PermissionKey>,
    city_scopes: HashMap<PermissionKey, Scope>,
}

impl PermissionBundle {
    /// Aggregates grant rows.
    ///
    /// Direct rows for the same key union their city ids; a direct row without a city
    /// makes the key unrestricted and specific cities seen afterwards are ignored.
    /// A key granted only through roles is unrestricted. When a key is both inherited
    /// and directly assigned, the direct rows decide its scope.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a PermissionGrantRow>,
    {
        let mut bundle = Self::default();
        let mut direct: HashMap<PermissionKey, Scope> = HashMap::new();

        for row in rows {
            let key = PermissionKey::new(&row.module, &row.action);
            bundle.granted.insert(key.clone());
            if row.inherited {
                continue;
            }

            let scope = direct.entry(key).or_default();
            match row.city_id {
                None => *scope = Scope::unrestricted(),
                Some(city_id) if !scope.all => {
                    scope.ids.insert(i64::from(city_id));
                }
                Some(_) => {}
            }
        }

        for key in &bundle.granted {
            let scope = direct.remove(key).unwrap_or_else(Scope::unrestricted);
            bundle.city_scopes.insert(key.clone(), scope);
        }

        bundle
    }

    pub fn has(&self, key: &PermissionKey) -> bool {
        self.granted.contains(key)
    }

    /// First of `candidates` that is granted.
    pub fn first_granted<'a>(&self, candidates: &'a [PermissionKey]) -> Option<&'a PermissionKey> {
        candidates.iter().find(|key| self.has(key))
    }

    /// City scope stored for `key`; empty when the key is not granted.
    pub fn city_scope(&self, key: &PermissionKey) -> Scope {
        self.city_scopes.get(key).cloned().unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PermissionKey> {
        self.granted.iter()
    }

    pub fn city_scopes(&self) -> impl Iterator<Item = (&PermissionKey, &Scope)> {
        self.city_scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}
