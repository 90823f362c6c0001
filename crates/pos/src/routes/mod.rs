//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Root redirect (dashboard or login)
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the document store)
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! POST /logout                  - Logout action
//! GET  /forgot-password         - Forgot password page
//! POST /forgot-password         - Forgot password notice
//!
//! # Owner (setup gate applies to the whole tree)
//! GET  /owner/dashboard         - Landing page
//! GET  /owner/setup             - Company setup wizard
//! POST /owner/setup             - Save company profile
//!
//! GET  /owner/stores            - Store list
//! GET  /owner/stores/new        - New store form
//! POST /owner/stores            - Create store
//! GET  /owner/stores/{id}       - Store detail
//!
//! GET  /owner/products          - Product list
//! GET  /owner/products/new      - New product form
//! POST /owner/products          - Create product
//!
//! GET  /owner/customers         - Customer list
//! GET  /owner/customers/new     - New customer form
//! POST /owner/customers         - Create customer
//!
//! # Sales (cart fragments are HTMX)
//! GET  /owner/sales/new         - Sale screen
//! POST /owner/sales/store       - Select store (fragment)
//! POST /owner/sales/customer    - Attach customer
//! POST /owner/sales/kind        - Set sale kind
//! GET  /owner/sales/cart        - Cart items fragment
//! POST /owner/sales/cart/add    - Add line (fragment)
//! POST /owner/sales/cart/update - Update quantity (fragment)
//! POST /owner/sales/cart/remove - Remove line (fragment)
//! GET  /owner/sales/cart/count  - Cart count badge (fragment)
//! POST /owner/sales/complete    - Complete the sale
//! ```

pub mod auth;
pub mod customers;
pub mod home;
pub mod products;
pub mod sales;
pub mod setup;
pub mod stores;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::state::AppState;

/// Format an amount for display (e.g. "$19.99").
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies document-store connectivity before returning OK.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route(
            "/forgot-password",
            get(auth::forgot_password_page).post(auth::forgot_password),
        )
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stores::index).post(stores::create))
        .route("/new", get(stores::new_page))
        .route("/{id}", get(stores::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_page))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index).post(customers::create))
        .route("/new", get(customers::new_page))
}

/// Create the sales routes router.
pub fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/new", get(sales::new_sale))
        .route("/store", post(sales::select_store))
        .route("/customer", post(sales::attach_customer))
        .route("/kind", post(sales::set_kind))
        .route("/cart", get(sales::cart_items))
        .route("/cart/add", post(sales::add_to_cart))
        .route("/cart/update", post(sales::update_cart))
        .route("/cart/remove", post(sales::remove_from_cart))
        .route("/cart/count", get(sales::cart_count))
        .route("/complete", post(sales::complete))
}

/// Routes reachable without a login.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::root))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(auth_routes())
}

/// The owner route tree; the setup gate is layered on top by `crate::app`.
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(home::dashboard))
        .route("/setup", get(setup::show).post(setup::save))
        .nest("/stores", store_routes())
        .nest("/products", product_routes())
        .nest("/customers", customer_routes())
        .nest("/sales", sales_routes())
}
