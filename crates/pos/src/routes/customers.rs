//! Customer route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use tillpoint_core::{CustomerId, Email};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CustomerRecord;
use crate::state::AppState;

/// Customer display data for templates.
#[derive(Clone)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<&CustomerRecord> for CustomerView {
    fn from(customer: &CustomerRecord) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            phone: customer.phone.clone().unwrap_or_default(),
            email: customer
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

/// Customer listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub customers: Vec<CustomerView>,
}

/// New customer form template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/new.html")]
pub struct NewCustomerTemplate {
    pub error: Option<String>,
}

/// New customer form data.
#[derive(Debug, Deserialize)]
pub struct NewCustomerForm {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Display the customer list.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse> {
    let customers = state.store().list_customers().await?;

    Ok(CustomersIndexTemplate {
        customers: customers.iter().map(CustomerView::from).collect(),
    })
}

/// Display the new customer form.
pub async fn new_page(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    NewCustomerTemplate { error: None }
}

/// Create a customer and navigate back to the list.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<NewCustomerForm>,
) -> Result<Response> {
    let customer = match build_customer(&form) {
        Ok(customer) => customer,
        Err(message) => {
            return Ok(NewCustomerTemplate {
                error: Some(message),
            }
            .into_response());
        }
    };

    state.store().put_customer(&customer).await?;
    tracing::info!(customer_id = %customer.id, "Customer created");

    Ok(Redirect::to("/owner/customers").into_response())
}

/// Validate the form and assemble a customer record.
fn build_customer(form: &NewCustomerForm) -> std::result::Result<CustomerRecord, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Customer name is required".to_owned());
    }

    let email = match form.email.trim() {
        "" => None,
        raw => Some(Email::parse(raw).map_err(|e| format!("Invalid email: {e}"))?),
    };

    let phone = form.phone.trim();
    Ok(CustomerRecord {
        id: CustomerId::new(Uuid::new_v4().to_string()),
        name: name.to_owned(),
        phone: (!phone.is_empty()).then(|| phone.to_owned()),
        email,
    })
}
