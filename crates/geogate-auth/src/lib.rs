//! # Geogate Auth
//!
//! Authentication types and JWT utilities for the Geogate API.
//!
//! Identity verification happens upstream; this crate only turns a signed bearer token
//! into an [`Actor`](geogate_models::Actor) with an id and an optional role.
//!
//! - [`claims`]: access token claim structure
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use geogate_auth::{create_access_token, verify_token};
//! use geogate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(42, Some("analyst"), &config)?;
//! let actor = verify_token(&token, &config)?.actor()?;
//! assert_eq!(actor.id, 42);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
