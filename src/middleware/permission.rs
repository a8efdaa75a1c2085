//! Permission gate for routes.
//!
//! ```rust,ignore
//! use axum::{Router, extract::{Request, State}, middleware::{self, Next}, routing::get};
//! use crate::middleware::permission::require_permission;
//!
//! let reports = Router::new()
//!     .route("/", get(list_reports))
//!     .route_layer(middleware::from_fn_with_state(
//!         state.clone(),
//!         |s: State<AppState>, req: Request, next: Next| {
//!             require_permission(s, req, next, "reports", "view")
//!         },
//!     ));
//! ```

use std::time::Instant;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use geogate_access::{AccessError, PermissionScopes};
use geogate_core::AppError;
use geogate_observability::track_scope_resolution;
use tracing::debug;

use crate::middleware::auth::current_actor;
use crate::state::AppState;

/// Allows the request through only when the caller holds `module:action`
/// (or `module:write` for a `view` check).
///
/// On success the caller and the effective city scope of the matched permission are
/// added to the request extensions. Scopes from earlier checks on the same request are
/// kept.
pub async fn require_permission(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    module: &'static str,
    action: &'static str,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let actor = current_actor(&mut parts, &state).await?;

    let started = Instant::now();
    let decision = state
        .engine
        .authorize(actor.as_ref(), module, action)
        .await
        .map_err(AccessError::from)?;
    track_scope_resolution(started.elapsed());

    let (key, scope) = decision.into_result()?;
    debug!(permission = %key, all = scope.all, "Permission check passed");

    match parts.extensions.get_mut::<PermissionScopes>() {
        Some(scopes) => scopes.insert(key, scope),
        None => {
            let mut scopes = PermissionScopes::new();
            scopes.insert(key, scope);
            parts.extensions.insert(scopes);
        }
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Scopes granted by the permission checks that ran for this request.
///
/// Empty when no check ran, in which case every city filter denies access.
#[derive(Debug, Clone, Default)]
pub struct GrantedScopes(pub PermissionScopes);

impl<S> FromRequestParts<S> for GrantedScopes
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(GrantedScopes(
            parts
                .extensions
                .get::<PermissionScopes>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}
