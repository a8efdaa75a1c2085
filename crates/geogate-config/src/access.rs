//! Authorization settings.
//!
//! # Environment Variables
//!
//! - `ADMIN_ROLE`: role name that bypasses permission checks and sees every city and
//!   zone (default `admin`, compared exactly)

use std::env;

#[derive(Clone, Debug)]
pub struct AccessConfig {
    pub admin_role: String,
}

impl AccessConfig {
    pub fn from_env() -> Self {
        Self {
            admin_role: env::var("ADMIN_ROLE")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "admin".to_string()),
        }
    }

    pub fn is_admin(&self, role: Option<&str>) -> bool {
        role == Some(self.admin_role.as_str())
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            admin_role: "admin".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_requires_exact_role() {
        let config = AccessConfig::default();
        assert!(config.is_admin(Some("admin")));
        assert!(!config.is_admin(Some("ADMIN")));
        assert!(!config.is_admin(Some("Admin")));
        assert!(!config.is_admin(Some(" admin ")));
        assert!(!config.is_admin(Some("analyst")));
        assert!(!config.is_admin(None));
    }
}
