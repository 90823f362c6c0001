//! Tillpoint POS library.
//!
//! The owner-facing application as a library, allowing the router to be
//! exercised in integration tests over the in-memory document store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod docstore;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

/// Build the application router with sessions and the setup gate wired in.
///
/// The binary adds static file serving and Sentry layers on top; tests use
/// this router as-is.
#[must_use]
pub fn app(state: AppState) -> Router {
    let owner = routes::owner_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::setup_gate,
    ));

    Router::new()
        .merge(routes::public_routes())
        .nest("/owner", owner)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::create_session_layer(state.config()))
        .with_state(state)
}

pub use state::AppState;
