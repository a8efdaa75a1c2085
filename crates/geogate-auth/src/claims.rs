//! JWT claim structures.

use anyhow::anyhow;
use geogate_core::AppError;
use geogate_models::Actor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `sub`: numeric user id, as a string
/// - `role`: coarse identity role (e.g. `admin`), if any
/// - `exp`: token expiration timestamp
/// - `iat`: token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Identity role of the user
    #[serde(default)]
    pub role: Option<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Builds the actor these claims describe.
    ///
    /// Fails when `sub` is not a positive integer.
    pub fn actor(&self) -> Result<Actor, AppError> {
        let id = self
            .sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid user ID in token")))?;

        let role = self
            .role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(str::to_string);

        Ok(Actor::new(id, role))
    }
}
