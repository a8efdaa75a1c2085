//! Permission keys and well-known permission names.
//!
//! A permission key is the lower-cased `module:action` pair stored in the
//! `permissions` table. Keys compare case-insensitively because they are always
//! normalized on construction.
//!
//! # Example
//!
//! ```ignore
//! use geogate_core::permissions::{self, PermissionKey};
//!
//! let key = PermissionKey::new("Cities", "View");
//! assert_eq!(key.as_str(), permissions::CITIES_VIEW);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Action implied by any `write` grant on the same module.
pub const VIEW_ACTION: &str = "view";
/// Action that also satisfies `view` checks.
pub const WRITE_ACTION: &str = "write";

// =============================================================================
// Cities permissions
// =============================================================================

/// Permission to list cities
pub const CITIES_VIEW: &str = "cities:view";
/// Permission to manage cities
pub const CITIES_WRITE: &str = "cities:write";

// =============================================================================
// Users permissions
// =============================================================================

/// Permission to read user access assignments
pub const USERS_VIEW: &str = "users:view";
/// Permission to change user access assignments
pub const USERS_WRITE: &str = "users:write";

// =============================================================================
// Permissions management
// =============================================================================

/// Permission to grant or revoke permissions
pub const PERMISSIONS_WRITE: &str = "permissions:write";

// =============================================================================
// Reports permissions
// =============================================================================

/// Permission to view reports
pub const REPORTS_VIEW: &str = "reports:view";
/// Permission to edit reports
pub const REPORTS_WRITE: &str = "reports:write";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionKey(String);

impl PermissionKey {
    pub fn new(module: &str, action: &str) -> Self {
        Self(format!("{}:{}", module, action).to_lowercase())
    }

    /// Parses a `module:action` string. Returns `None` when the separator is missing.
    pub fn parse(raw: &str) -> Option<Self> {
        let (module, action) = raw.split_once(':')?;
        Some(Self::new(module, action))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Keys to try, in order, when checking `module:action`.
    ///
    /// A `view` check also accepts `module:write`, tried after the exact key.
    pub fn candidates(module: &str, action: &str) -> Vec<PermissionKey> {
        let mut keys = vec![PermissionKey::new(module, action)];
        if action.eq_ignore_ascii_case(VIEW_ACTION) {
            keys.push(PermissionKey::new(module, WRITE_ACTION));
        }
        keys
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PermissionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
