//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: bearer token verification and the [`AuthUser`](auth::AuthUser) extractor
//! - [`permission`]: permission gate that records granted city scopes on the request
//! - [`zone`]: zone scope resolution for zone-bound routes
//!
//! # Request Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `require_permission` resolves the caller and runs the access decision
//! 3. The matched permission's city scope is stored as `PermissionScopes`
//! 4. Handlers read it back through `GrantedScopes` and filter their queries
//!
//! # Example
//!
//! ```ignore
//! async fn list_reports(GrantedScopes(scopes): GrantedScopes) -> impl IntoResponse {
//!     let filter = scopes.effective_city_filter("reports", "view");
//!     // None: every city, Some(ids): only these, Some([]): nothing
//! }
//! ```

pub mod auth;
pub mod permission;
pub mod zone;
