//! Authorization outcomes.

use std::collections::HashMap;

use anyhow::anyhow;
use geogate_core::{AppError, PermissionKey, Scope};
use geogate_db::StoreError;

/// Result of checking `module:action` for a caller. Every variant is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No authenticated caller.
    Unauthenticated,
    /// The caller holds none of the candidate keys. Carries the key that was asked for,
    /// never the fallback.
    Forbidden { required: PermissionKey },
    /// Access allowed under `scope`, recorded against the key that matched.
    Granted { key: PermissionKey, scope: Scope },
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted { .. })
    }

    pub fn into_result(self) -> Result<(PermissionKey, Scope), AccessError> {
        match self {
            Decision::Granted { key, scope } => Ok((key, scope)),
            Decision::Forbidden { required } => Err(AccessError::Forbidden(required)),
            Decision::Unauthenticated => Err(AccessError::Unauthenticated),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Unauthorized: user context missing")]
    Unauthenticated,

    #[error("Forbidden: missing permission {0}")]
    Forbidden(PermissionKey),

    #[error("Scope resolution failed: {0}")]
    ScopeResolution(#[from] StoreError),
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => {
                AppError::unauthorized(anyhow!("Unauthorized: user context missing"))
            }
            AccessError::Forbidden(required) => AppError::missing_permission(&required),
            AccessError::ScopeResolution(source) => {
                tracing::error!(error = %source, "Permission check failed");
                AppError::internal(anyhow!("Permission check failed"))
            }
        }
    }
}

/// Effective city scopes granted during one request, keyed by the matched permission.
#[derive(Debug, Clone, Default)]
pub struct PermissionScopes {
    scopes: HashMap<PermissionKey, Scope>,
}

impl PermissionScopes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PermissionKey, scope: Scope) {
        self.scopes.insert(key, scope);
    }

    /// Scope granted for `module:action`, falling back to `module:write` for views.
    pub fn get(&self, module: &str, action: &str) -> Option<&Scope> {
        PermissionKey::candidates(module, action)
            .iter()
            .find_map(|key| self.scopes.get(key))
    }

    /// City filter for a downstream query.
    ///
    /// `None` means unrestricted, `Some(vec![])` means no access. A check that never
    /// ran for this request yields no access.
    pub fn effective_city_filter(&self, module: &str, action: &str) -> Option<Vec<i64>> {
        match self.get(module, action) {
            Some(scope) => scope.to_filter(),
            None => Some(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
