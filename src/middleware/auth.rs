use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use geogate_auth::verify_token;
use geogate_core::AppError;
use geogate_models::Actor;

use crate::state::AppState;

/// Resolves the caller of this request.
///
/// An actor already placed in the request extensions wins. Without an
/// `Authorization` header the caller is anonymous (`Ok(None)`); a header that is
/// present but malformed or carries an invalid token is rejected.
pub async fn current_actor(parts: &mut Parts, state: &AppState) -> Result<Option<Actor>, AppError> {
    if let Some(actor) = parts.extensions.get::<Actor>() {
        return Ok(Some(actor.clone()));
    }

    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

    let actor = verify_token(token, &state.jwt_config)?.actor()?;
    parts.extensions.insert(actor.clone());

    Ok(Some(actor))
}

/// Extractor for routes that need an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Actor);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.id
    }

    pub fn role(&self) -> Option<&str> {
        self.0.role()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        current_actor(parts, state)
            .await?
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(anyhow!("Unauthorized: user context missing")))
    }
}
