//! # Geogate Core
//!
//! Core types shared by every Geogate crate:
//!
//! - [`scope`]: the city/zone scope value and its combination algebra
//! - [`permissions`]: `module:action` permission keys and well-known permission names
//! - [`errors`]: application error type with HTTP response conversion
//! - [`serde`]: lenient id coercion used at data-shape boundaries
//!
//! # Example
//!
//! ```ignore
//! use geogate_core::{PermissionKey, Scope};
//!
//! let base = Scope::from_ids([1, 2, 3]);
//! let overlay = Scope::from_ids([2, 3, 4]);
//! assert_eq!(base.combine(&overlay), Scope::from_ids([2, 3]));
//!
//! let key = PermissionKey::new("Reports", "VIEW");
//! assert_eq!(key.as_str(), "reports:view");
//! ```

pub mod errors;
pub mod permissions;
pub mod scope;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use permissions::PermissionKey;
pub use scope::{Scope, combine, normalize};
