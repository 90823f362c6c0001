//! Setup-completion gate for the owner route tree.
//!
//! Owners whose company profile is missing or not marked complete are
//! redirected into the setup wizard before they can use any other owner
//! screen. The decision is a pure function over explicit inputs
//! ([`evaluate`]); the middleware fetches the inputs from the session and
//! document store and applies the resulting action, so the redirect is an
//! observable return value rather than a hidden side effect.
//!
//! Fetch failures fail open: the error is logged and captured, and the
//! request proceeds without a company profile. A document-store outage must
//! not trap every request in the wizard.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use tillpoint_core::UserRole;

use crate::config::SetupGateConfig;
use crate::middleware::auth::AuthRejection;
use crate::models::{CompanyInfo, CurrentUser, session_keys};
use crate::state::AppState;

/// Path of the setup wizard.
pub const SETUP_PATH: &str = "/owner/setup";

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through.
    Proceed,
    /// Redirect the request to the setup wizard.
    RedirectToSetup,
}

/// Decide whether a request must be redirected into the setup wizard.
///
/// `role` is the role from the identity's user record (`None` when no record
/// was found); `company` is the tenant's profile (`None` when absent, which
/// is treated identically to "not completed"). Non-owners are never
/// redirected. The wizard itself and any path in
/// [`SetupGateConfig::exclude_routes`] are always let through.
#[must_use]
pub fn evaluate(
    role: Option<UserRole>,
    company: Option<&CompanyInfo>,
    policy: &SetupGateConfig,
    current_path: &str,
) -> GateDecision {
    if role != Some(UserRole::Owner) {
        return GateDecision::Proceed;
    }

    if company.is_some_and(|c| c.setup_completed) {
        return GateDecision::Proceed;
    }

    if !policy.redirect_if_not_setup {
        return GateDecision::Proceed;
    }

    if current_path == SETUP_PATH {
        return GateDecision::Proceed;
    }

    if policy.exclude_routes.iter().any(|r| r == current_path) {
        return GateDecision::Proceed;
    }

    GateDecision::RedirectToSetup
}

/// Middleware applying the setup gate to the owner route tree.
///
/// Unauthenticated requests pass through untouched (login enforcement is the
/// auth extractor's job). For owners, the user record and company profile
/// are fetched per request; there is no cross-request gate state to go
/// stale.
pub async fn setup_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let user: Option<CurrentUser> = match request.extensions().get::<Session>() {
        Some(session) => session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten(),
        None => None,
    };

    let Some(user) = user else {
        return next.run(request).await;
    };

    let role = match state.store().fetch_user(&user.id).await {
        Ok(record) => record.map(|r| r.role),
        Err(e) => {
            capture_gate_error(&e, "user record");
            return next.run(request).await;
        }
    };

    // Non-owners are never redirected; skip the company fetch entirely.
    if role != Some(UserRole::Owner) {
        return next.run(request).await;
    }

    let company = match state.store().fetch_company(&user.id).await {
        Ok(company) => company,
        Err(e) => {
            capture_gate_error(&e, "company profile");
            return next.run(request).await;
        }
    };

    let path = request.uri().path().to_owned();
    match evaluate(role, company.as_ref(), &state.config().setup, &path) {
        GateDecision::Proceed => next.run(request).await,
        GateDecision::RedirectToSetup => Redirect::to(SETUP_PATH).into_response(),
    }
}

fn capture_gate_error(error: &crate::docstore::DocStoreError, what: &str) {
    sentry::capture_error(error);
    tracing::error!(error = %error, "setup gate failed to fetch {what}, proceeding without it");
}

/// Extractor giving handlers the current operator and their company profile.
///
/// Requires a logged-in operator; the company is `None` when the tenant has
/// no profile yet or the fetch failed (logged).
pub struct CompanyContext {
    /// The logged-in operator.
    pub user: CurrentUser,
    /// The tenant's company profile, when present.
    pub company: Option<CompanyInfo>,
}

impl FromRequestParts<AppState> for CompanyContext {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        let company = match state.store().fetch_company(&user.id).await {
            Ok(company) => company,
            Err(e) => {
                capture_gate_error(&e, "company profile");
                None
            }
        };

        Ok(Self { user, company })
    }
}

#[cfg(test)]
mod tests {
    use tillpoint_core::Email;

    use super::*;

    fn company(setup_completed: bool) -> CompanyInfo {
        CompanyInfo {
            logo_url: None,
            name: "Corner Shop".to_owned(),
            activity_domain: "grocery".to_owned(),
            phone: "+1 555 0100".to_owned(),
            email: Email::parse("owner@cornershop.example").expect("valid email"),
            website: None,
            tax_number: "TX-1".to_owned(),
            commercial_register_number: "CR-1".to_owned(),
            address: "1 Main St".to_owned(),
            primary_color: "#1d4ed8".to_owned(),
            setup_completed,
        }
    }

    fn policy(exclude: &[&str]) -> SetupGateConfig {
        SetupGateConfig {
            redirect_if_not_setup: true,
            exclude_routes: exclude.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn non_owners_are_never_redirected() {
        for role in [None, Some(UserRole::Manager), Some(UserRole::Cashier)] {
            assert_eq!(
                evaluate(role, None, &policy(&[]), "/owner/products"),
                GateDecision::Proceed
            );
            assert_eq!(
                evaluate(role, Some(&company(false)), &policy(&[]), "/owner/products"),
                GateDecision::Proceed
            );
        }
    }

    #[test]
    fn owner_without_company_is_redirected() {
        assert_eq!(
            evaluate(Some(UserRole::Owner), None, &policy(&[]), "/owner/products"),
            GateDecision::RedirectToSetup
        );
    }

    #[test]
    fn incomplete_setup_is_treated_like_no_company() {
        assert_eq!(
            evaluate(
                Some(UserRole::Owner),
                Some(&company(false)),
                &policy(&[]),
                "/owner/products"
            ),
            GateDecision::RedirectToSetup
        );
    }

    #[test]
    fn completed_setup_proceeds() {
        assert_eq!(
            evaluate(
                Some(UserRole::Owner),
                Some(&company(true)),
                &policy(&[]),
                "/owner/products"
            ),
            GateDecision::Proceed
        );
    }

    #[test]
    fn the_wizard_itself_is_never_redirected() {
        assert_eq!(
            evaluate(Some(UserRole::Owner), None, &policy(&[]), SETUP_PATH),
            GateDecision::Proceed
        );
    }

    #[test]
    fn excluded_routes_are_let_through() {
        let policy = policy(&["/owner/billing"]);
        assert_eq!(
            evaluate(Some(UserRole::Owner), None, &policy, "/owner/billing"),
            GateDecision::Proceed
        );
        // Any other path is still redirected
        assert_eq!(
            evaluate(Some(UserRole::Owner), None, &policy, "/owner/products"),
            GateDecision::RedirectToSetup
        );
    }

    #[test]
    fn redirect_can_be_disabled_by_policy() {
        let policy = SetupGateConfig {
            redirect_if_not_setup: false,
            exclude_routes: Vec::new(),
        };
        assert_eq!(
            evaluate(Some(UserRole::Owner), None, &policy, "/owner/products"),
            GateDecision::Proceed
        );
    }
}
