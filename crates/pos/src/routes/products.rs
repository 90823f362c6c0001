//! Product route handlers.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use tillpoint_core::ProductId;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::ProductRecord;
use crate::routes::format_money;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub sku: String,
}

impl From<&ProductRecord> for ProductView {
    fn from(product: &ProductRecord) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_money(product.price),
            sku: product.sku.clone().unwrap_or_default(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
}

/// New product form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub error: Option<String>,
}

/// New product form data.
#[derive(Debug, Deserialize)]
pub struct NewProductForm {
    pub name: String,
    pub price: String,
    pub sku: String,
}

/// Display the product list.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse> {
    let products = state.store().list_products().await?;

    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// Display the new product form.
pub async fn new_page(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    NewProductTemplate { error: None }
}

/// Create a product and navigate back to the list.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<NewProductForm>,
) -> Result<Response> {
    let product = match build_product(&form) {
        Ok(product) => product,
        Err(message) => {
            return Ok(NewProductTemplate {
                error: Some(message),
            }
            .into_response());
        }
    };

    state.store().put_product(&product).await?;
    tracing::info!(product_id = %product.id, "Product created");

    Ok(Redirect::to("/owner/products").into_response())
}

/// Validate the form and assemble a product record.
fn build_product(form: &NewProductForm) -> std::result::Result<ProductRecord, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Product name is required".to_owned());
    }

    let price = Decimal::from_str(form.price.trim())
        .map_err(|_| "Price must be a number like 19.99".to_owned())?;
    if price < Decimal::ZERO {
        return Err("Price cannot be negative".to_owned());
    }

    let sku = form.sku.trim();
    Ok(ProductRecord {
        id: ProductId::new(Uuid::new_v4().to_string()),
        name: name.to_owned(),
        price,
        sku: (!sku.is_empty()).then(|| sku.to_owned()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str) -> NewProductForm {
        NewProductForm {
            name: "Espresso".to_owned(),
            price: price.to_owned(),
            sku: String::new(),
        }
    }

    #[test]
    fn parses_decimal_prices() {
        let product = build_product(&form("3.50")).expect("valid form");
        assert_eq!(product.price, Decimal::new(350, 2));
        assert_eq!(product.sku, None);
    }

    #[test]
    fn rejects_negative_and_malformed_prices() {
        assert!(build_product(&form("-1")).is_err());
        assert!(build_product(&form("three")).is_err());
    }
}
