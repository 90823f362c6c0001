//! Root redirect and owner dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect};

use crate::error::Result;
use crate::filters;
use crate::middleware::{CompanyContext, OptionalAuth};
use crate::state::AppState;

/// Root path: authenticated operators land on the dashboard, everyone else
/// on the login page.
pub async fn root(OptionalAuth(user): OptionalAuth) -> Redirect {
    match user {
        Some(_) => Redirect::to("/owner/dashboard"),
        None => Redirect::to("/login"),
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/dashboard.html")]
pub struct DashboardTemplate {
    pub company_name: Option<String>,
    pub store_count: usize,
    pub product_count: usize,
    pub customer_count: usize,
}

/// Owner landing page with catalog counts.
pub async fn dashboard(
    State(state): State<AppState>,
    ctx: CompanyContext,
) -> Result<impl IntoResponse> {
    let stores = state.store().list_stores().await?;
    let products = state.store().list_products().await?;
    let customers = state.store().list_customers().await?;

    Ok(DashboardTemplate {
        company_name: ctx.company.map(|c| c.name),
        store_count: stores.len(),
        product_count: products.len(),
        customer_count: customers.len(),
    })
}
