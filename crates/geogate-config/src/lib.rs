//! # Geogate Config
//!
//! Configuration types for the Geogate API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`access`]: authorization behaviour (admin role name)
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: JWT authentication configuration
//! - [`server`]: HTTP listener address
//!
//! # Example
//!
//! ```ignore
//! use geogate_config::{AccessConfig, CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let access_config = AccessConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod access;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use access::AccessConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
