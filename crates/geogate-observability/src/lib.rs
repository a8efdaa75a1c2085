//! Geogate Observability Module
//!
//! Provides configurable observability features including:
//! - Structured logging to console and rolling files
//! - Metrics collection via Prometheus
//! - HTTP request/response logging
//!
//! This module can be enabled or disabled at compile time via the `observability` feature flag.
//! At runtime, observability can be further controlled via the `OBSERVABILITY_ENABLED` environment variable.
//!
//! # Features
//!
//! - `observability` (default): Enables file logging and Prometheus metrics
//!
//! # Examples
//!
//! ```no_run
//! use geogate_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing().expect("log directory");
//!     // ... application code ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

// Re-export PrometheusHandle type when observability is enabled
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_city_access_synced,
    track_scope_resolution,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// No-op observability check when feature disabled
    pub fn is_observability_enabled() -> bool {
        false
    }

    /// No-op logging middleware when feature disabled
    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// No-op metrics middleware when feature disabled
    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console-only logging when feature disabled
    pub fn init_tracing() -> std::io::Result<()> {
        crate::basic_logging::init_basic_console_logging();
        Ok(())
    }

    /// No-op tracer shutdown when feature disabled
    pub async fn shutdown_tracer() {}

    /// No-op metrics initialization when feature disabled
    pub fn init_metrics() -> Option<()> {
        None
    }

    pub fn track_scope_resolution(_duration: std::time::Duration) {}

    pub fn track_city_access_synced(_city_count: usize) {}

    /// Empty metrics router when feature disabled
    pub fn metrics_app(_handle: ()) -> Router {
        Router::new()
    }
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
