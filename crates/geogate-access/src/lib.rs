//! # Geogate Access
//!
//! Resolves what an authenticated actor may do and over which cities and zones.
//!
//! - [`bundle`]: aggregation of grant rows into per-key city scopes
//! - [`permissions`]: generation-cached permission bundles
//! - [`city`]: base city scope resolver (cached) and city grant sync
//! - [`zone`]: zone scope resolver (uncached) and zone checks
//! - [`decision`]: authorization outcomes and the per-request scope map
//! - [`engine`]: [`AccessEngine`], which owns the caches and runs the decision procedure
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use geogate_access::{AccessEngine, Decision};
//!
//! let engine = AccessEngine::new(Arc::new(store), AccessConfig::from_env());
//! match engine.authorize(Some(&actor), "reports", "view").await? {
//!     Decision::Granted { key, scope } => println!("{key}: {:?}", scope.to_filter()),
//!     Decision::Forbidden { required } => println!("missing {required}"),
//!     Decision::Unauthenticated => println!("who are you?"),
//! }
//! ```

pub mod bundle;
pub mod city;
pub mod decision;
pub mod engine;
pub mod permissions;
pub mod zone;

pub use bundle::PermissionBundle;
pub use city::{CityAccessResolver, normalize_city_ids};
pub use decision::{AccessError, Decision, PermissionScopes};
pub use engine::AccessEngine;
pub use permissions::PermissionCache;
pub use zone::{ZoneAccessResolver, assert_zone_access};
