//! Integration test support for Tillpoint.
//!
//! [`TestContext`] builds the full application router over the in-memory
//! document store so tests can drive real HTTP round trips in-process,
//! including session cookies, the setup gate, and the sales flow.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use tower::ServiceExt;

use tillpoint_core::{Email, TenantId, UserRole};
use tillpoint_pos::config::{DocStoreConfig, PosConfig, SetupGateConfig};
use tillpoint_pos::docstore::{DocumentStore, MemoryDocumentStore};
use tillpoint_pos::models::CompanyInfo;
use tillpoint_pos::services::AuthService;
use tillpoint_pos::{AppState, app};

/// Email and password used by the seeded accounts.
pub const TEST_EMAIL: &str = "owner@example.com";
pub const TEST_PASSWORD: &str = "till+point!";

/// A fully wired application over the in-memory document store.
pub struct TestContext {
    router: Router,
    /// Direct handle to the backing store for seeding.
    pub store: Arc<MemoryDocumentStore>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build a context with the default setup-gate policy (redirect on,
    /// no excluded routes).
    #[must_use]
    pub fn new() -> Self {
        Self::with_setup_policy(SetupGateConfig {
            redirect_if_not_setup: true,
            exclude_routes: Vec::new(),
        })
    }

    /// Build a context with a specific setup-gate policy.
    #[must_use]
    pub fn with_setup_policy(setup: SetupGateConfig) -> Self {
        let config = PosConfig {
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:4000".to_owned(),
            session_secret: SecretString::from("x".repeat(32)),
            docstore: DocStoreConfig {
                base_url: "http://localhost:9090".to_owned(),
                api_key: SecretString::from("k".repeat(32)),
            },
            setup,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let store = Arc::new(MemoryDocumentStore::default());
        let state = AppState::new(config, store.clone());

        Self {
            router: app(state),
            store,
        }
    }

    /// Seed a user account and return its tenant id.
    pub async fn seed_user(&self, role: UserRole) -> TenantId {
        let id = TenantId::new("tenant_1");
        AuthService::new(&*self.store)
            .create_user(&id, TEST_EMAIL, TEST_PASSWORD, role)
            .await
            .expect("seed user");
        id
    }

    /// Seed a company profile for a tenant.
    pub async fn seed_company(&self, id: &TenantId, setup_completed: bool) {
        let company = CompanyInfo {
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
        };

        self.store
            .save_company(id, &company)
            .await
            .expect("seed company");
    }

    /// Log in with the seeded credentials and return the session cookie.
    pub async fn login(&self) -> String {
        let response = self
            .post_form("/login", "email=owner%40example.com&password=till%2Bpoint%21", None)
            .await;
        assert_eq!(response.status(), 303, "login should redirect on success");

        session_cookie(&response).expect("login should set the session cookie")
    }

    /// Issue a GET request, optionally with a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(Body::empty()).expect("build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Issue a form POST, optionally with a session cookie.
    pub async fn post_form(
        &self,
        path: &str,
        body: &str,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder
            .body(Body::from(body.to_owned()))
            .expect("build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

/// Extract the session cookie pair from a response, if one was set.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("tp_session="))
        .and_then(|value| value.split(';').next())
        .map(ToOwned::to_owned)
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Collect a response body into a string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
