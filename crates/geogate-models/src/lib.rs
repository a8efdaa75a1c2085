//! # Geogate Models
//!
//! Domain models and DTOs for the Geogate API.
//!
//! # Modules
//!
//! - [`actor`]: the authenticated caller
//! - [`access`]: grant rows, city/zone access records and request/response DTOs
//!
//! # Example
//!
//! ```ignore
//! use geogate_models::{Actor, CityAccess};
//!
//! let actor = Actor::new(42, Some("analyst".to_string()));
//! let access = CityAccess::unrestricted();
//! ```

pub mod access;
pub mod actor;

// Re-export commonly used types at crate root for convenience
pub use access::{
    AccessSummary, AllowedCitiesResponse, CacheGenerations, City, CityAccess, CityIdRow, PermissionGrantRow,
    SyncCityAccessDto, SyncCityAccessResponse, Zone, ZoneAccess, ZoneIdRow,
};
pub use actor::Actor;
