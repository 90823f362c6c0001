//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added by the binary)
//! 2. Session layer (tower-sessions, in-memory store)
//! 3. Request ID (add unique ID to each request)
//! 4. Setup gate (owner route tree only)

pub mod auth;
pub mod request_id;
pub mod session;
pub mod setup_gate;

pub use auth::{AuthRejection, OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
pub use setup_gate::{CompanyContext, GateDecision, SETUP_PATH, evaluate, setup_gate};
