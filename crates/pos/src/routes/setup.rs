//! Company setup wizard.
//!
//! The profile form every owner must complete before using the rest of the
//! app. Saving a valid profile marks setup as completed, which releases the
//! setup gate.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use tillpoint_core::Email;

use crate::error::Result;
use crate::filters;
use crate::middleware::CompanyContext;
use crate::models::CompanyInfo;
use crate::state::AppState;

/// Setup page template.
#[derive(Template, WebTemplate)]
#[template(path = "setup/show.html")]
pub struct SetupTemplate {
    pub form: SetupFormView,
    pub error: Option<String>,
}

/// Form prefill values; empty strings when no profile exists yet.
#[derive(Default)]
pub struct SetupFormView {
    pub logo_url: String,
    pub name: String,
    pub activity_domain: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub tax_number: String,
    pub commercial_register_number: String,
    pub address: String,
    pub primary_color: String,
}

impl From<Option<&CompanyInfo>> for SetupFormView {
    fn from(company: Option<&CompanyInfo>) -> Self {
        match company {
            Some(c) => Self {
                logo_url: c.logo_url.clone().unwrap_or_default(),
                name: c.name.clone(),
                activity_domain: c.activity_domain.clone(),
                phone: c.phone.clone(),
                email: c.email.to_string(),
                website: c.website.clone().unwrap_or_default(),
                tax_number: c.tax_number.clone(),
                commercial_register_number: c.commercial_register_number.clone(),
                address: c.address.clone(),
                primary_color: c.primary_color.clone(),
            },
            None => Self {
                primary_color: "#1d4ed8".to_owned(),
                ..Self::default()
            },
        }
    }
}

/// Company profile form data.
#[derive(Debug, Deserialize)]
pub struct SetupForm {
    pub logo_url: String,
    pub name: String,
    pub activity_domain: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub tax_number: String,
    pub commercial_register_number: String,
    pub address: String,
    pub primary_color: String,
}

/// Display the setup wizard, pre-filled when a profile already exists.
pub async fn show(ctx: CompanyContext) -> impl IntoResponse {
    SetupTemplate {
        form: SetupFormView::from(ctx.company.as_ref()),
        error: None,
    }
}

/// Save the company profile and mark setup as completed.
pub async fn save(
    State(state): State<AppState>,
    ctx: CompanyContext,
    Form(form): Form<SetupForm>,
) -> Result<Response> {
    let company = match build_company(&form) {
        Ok(company) => company,
        Err(message) => {
            return Ok(SetupTemplate {
                form: SetupFormView::from(ctx.company.as_ref()),
                error: Some(message),
            }
            .into_response());
        }
    };

    state.store().save_company(&ctx.user.id, &company).await?;

    tracing::info!(tenant_id = %ctx.user.id, "Company setup completed");
    Ok(Redirect::to("/owner/dashboard").into_response())
}

/// Validate the form and assemble a completed profile.
fn build_company(form: &SetupForm) -> std::result::Result<CompanyInfo, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Company name is required".to_owned());
    }

    let email = Email::parse(form.email.trim())
        .map_err(|e| format!("Invalid contact email: {e}"))?;

    let primary_color = form.primary_color.trim();
    if !primary_color.starts_with('#') {
        return Err("Primary color must be a hex value like #1d4ed8".to_owned());
    }

    Ok(CompanyInfo {
        logo_url: optional(&form.logo_url),
        name: name.to_owned(),
        activity_domain: form.activity_domain.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
        email,
        website: optional(&form.website),
        tax_number: form.tax_number.trim().to_owned(),
        commercial_register_number: form.commercial_register_number.trim().to_owned(),
        address: form.address.trim().to_owned(),
        primary_color: primary_color.to_owned(),
        setup_completed: true,
    })
}

/// Empty form inputs become `None`.
fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SetupForm {
        SetupForm {
            logo_url: String::new(),
            name: "Corner Shop".to_owned(),
            activity_domain: "grocery".to_owned(),
            phone: "+1 555 0100".to_owned(),
            email: "owner@cornershop.example".to_owned(),
            website: " https://cornershop.example ".to_owned(),
            tax_number: "TX-1".to_owned(),
            commercial_register_number: "CR-1".to_owned(),
            address: "1 Main St".to_owned(),
            primary_color: "#1d4ed8".to_owned(),
        }
    }

    #[test]
    fn a_valid_form_completes_setup() {
        let company = build_company(&valid_form()).expect("valid form");
        assert!(company.setup_completed);
        assert_eq!(company.logo_url, None);
        assert_eq!(
            company.website.as_deref(),
            Some("https://cornershop.example")
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut form = valid_form();
        form.name = "   ".to_owned();
        assert!(build_company(&form).is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".to_owned();
        assert!(build_company(&form).is_err());
    }

    #[test]
    fn non_hex_color_is_rejected() {
        let mut form = valid_form();
        form.primary_color = "blue".to_owned();
        assert!(build_company(&form).is_err());
    }
}
