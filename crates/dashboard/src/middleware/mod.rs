//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with in-memory store)

pub mod auth;
pub mod session;

pub use auth::{
    AuthRejection, RequireSeller, clear_dashboard_session, load_dashboard_session,
    save_dashboard_session,
};
pub use session::create_session_layer;
