//! Grant rows and access records.
//!
//! Row types map one-to-one onto the grant queries issued by the access store;
//! record types are what the resolvers hand back to callers.

use std::collections::BTreeMap;

use geogate_core::Scope;
use geogate_core::serde::deserialize_lenient_ids;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One row of the combined role-inherited ∪ direct permission query.
///
/// Role-inherited rows never carry a city. On a direct row, `city_id = None` means the
/// grant applies to every city.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PermissionGrantRow {
    pub module: String,
    pub action: String,
    pub city_id: Option<i32>,
    pub inherited: bool,
}

impl PermissionGrantRow {
    /// A directly-assigned grant.
    pub fn new(module: &str, action: &str, city_id: Option<i32>) -> Self {
        Self {
            module: module.to_string(),
            action: action.to_string(),
            city_id,
            inherited: false,
        }
    }

    /// A grant inherited through a role.
    pub fn inherited(module: &str, action: &str) -> Self {
        Self {
            module: module.to_string(),
            action: action.to_string(),
            city_id: None,
            inherited: true,
        }
    }
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct CityIdRow {
    pub city_id: i32,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct ZoneIdRow {
    pub zone_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct City {
    #[sqlx(rename = "city_id")]
    #[serde(rename = "city_id")]
    pub id: i32,
    #[sqlx(rename = "city_name")]
    #[serde(rename = "city_name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Zone {
    #[sqlx(rename = "zone_id")]
    #[serde(rename = "zone_id")]
    pub id: i32,
    #[sqlx(rename = "zone_name")]
    #[serde(rename = "zone_name")]
    pub name: String,
    pub city_id: Option<i32>,
}

/// Base city scope of an actor.
///
/// `cities` is only populated when the caller asked for city metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CityAccess {
    pub all: bool,
    pub ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<City>>,
}

impl CityAccess {
    pub fn unrestricted() -> Self {
        Self {
            all: true,
            ids: Vec::new(),
            cities: None,
        }
    }

    pub fn restricted(ids: Vec<i64>) -> Self {
        Self {
            all: false,
            ids,
            cities: None,
        }
    }

    pub fn to_scope(&self) -> Scope {
        if self.all {
            Scope::unrestricted()
        } else {
            Scope::from_ids(self.ids.iter().copied())
        }
    }
}

/// Zone scope of an actor. Never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ZoneAccess {
    pub all: bool,
    pub ids: Vec<i64>,
}

impl ZoneAccess {
    pub fn unrestricted() -> Self {
        Self {
            all: true,
            ids: Vec::new(),
        }
    }

    pub fn restricted(ids: Vec<i64>) -> Self {
        Self { all: false, ids }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SyncCityAccessDto {
    /// Cities the user may access. Non-numeric entries are ignored.
    #[serde(default, deserialize_with = "deserialize_lenient_ids")]
    #[validate(length(max = 10000, message = "too many city ids"))]
    pub city_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SyncCityAccessResponse {
    pub user_id: i64,
    pub city_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AllowedCitiesResponse {
    pub all: bool,
    pub cities: Vec<City>,
}

/// Caller's resolved permissions, as returned by `GET /api/access/me`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessSummary {
    pub actor: crate::Actor,
    pub admin: bool,
    pub permissions: Vec<String>,
    pub city_scopes: BTreeMap<String, Scope>,
    pub base_city_scope: Scope,
    pub zone_access: ZoneAccess,
}

/// Cache generations after an invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CacheGenerations {
    pub permission_generation: u64,
    pub city_generation: u64,
}
