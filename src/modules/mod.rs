//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: logic on top of the access engine
//! - `router.rs`: Axum router, including the permission layers for its routes

pub mod access;
pub mod cities;
pub mod users;
pub mod zones;
