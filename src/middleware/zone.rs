use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use geogate_core::AppError;
use geogate_models::ZoneAccess;
use tracing::error;

use crate::middleware::auth::current_actor;
use crate::state::AppState;

/// Resolves the caller's zone scope and stores it in the request extensions.
///
/// Anonymous callers get an empty scope. Resolution failures end the request with a
/// 500 instead of continuing unscoped.
pub async fn attach_zone_scope(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let actor = current_actor(&mut parts, &state).await?;

    let scope = state
        .engine
        .fetch_zone_access(actor.as_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Zone scope resolution failed");
            AppError::internal(anyhow!("Unable to resolve zone access scope."))
        })?;

    parts.extensions.insert(scope);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Zone scope attached by [`attach_zone_scope`], if it ran.
#[derive(Debug, Clone)]
pub struct ZoneScope(pub Option<ZoneAccess>);

impl<S> FromRequestParts<S> for ZoneScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ZoneScope(parts.extensions.get::<ZoneAccess>().cloned()))
    }
}
