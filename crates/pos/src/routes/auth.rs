//! Authentication route handlers.
//!
//! Session login against the document store's `users` collection, logout,
//! and the forgot-password notice page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Forgot password form data.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Forgot password page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/forgot_password.html")]
pub struct ForgotPasswordTemplate {
    pub success: bool,
}

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    let error = query.error.as_deref().map(|code| match code {
        "session" => "Your session could not be saved. Please try again.".to_owned(),
        _ => "Sign-in failed. Check your email and password.".to_owned(),
    });

    let success = query
        .success
        .as_deref()
        .map(|_| "You have been signed out.".to_owned());

    LoginTemplate { error, success }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.store());

    match auth.login(&form.email, &form.password).await {
        Ok((id, user)) => {
            let current_user = CurrentUser {
                id,
                email: user.email,
                role: user.role,
            };

            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/login?error=session").into_response();
            }

            Redirect::to("/owner/dashboard").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/login?error=credentials").into_response()
        }
    }
}

/// Display the forgot-password page.
pub async fn forgot_password_page() -> impl IntoResponse {
    ForgotPasswordTemplate { success: false }
}

/// Handle the forgot-password form.
///
/// Always renders the same notice to prevent email enumeration; the request
/// itself is only logged for the administrator to act on.
pub async fn forgot_password(Form(form): Form<ForgotPasswordForm>) -> impl IntoResponse {
    tracing::info!(email = %form.email, "Password reset requested");
    ForgotPasswordTemplate { success: true }
}

/// Handle logout.
///
/// Clears the login and destroys the session, which also discards any
/// in-progress sale.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/login?success=signed_out").into_response()
}
