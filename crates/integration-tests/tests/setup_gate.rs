//! Setup-gate behavior over the full router.

use tillpoint_core::UserRole;
use tillpoint_integration_tests::{TestContext, location};
use tillpoint_pos::config::SetupGateConfig;

#[tokio::test]
async fn unauthenticated_owner_routes_redirect_to_login() {
    let ctx = TestContext::new();

    let response = ctx.get("/owner/dashboard", None).await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/login"));
}

#[tokio::test]
async fn root_redirects_by_auth_state() {
    let ctx = TestContext::new();
    ctx.seed_user(UserRole::Owner).await;

    let anonymous = ctx.get("/", None).await;
    assert_eq!(location(&anonymous).as_deref(), Some("/login"));

    let cookie = ctx.login().await;
    let signed_in = ctx.get("/", Some(&cookie)).await;
    assert_eq!(location(&signed_in).as_deref(), Some("/owner/dashboard"));
}

#[tokio::test]
async fn owner_with_no_company_is_redirected_to_setup() {
    let ctx = TestContext::new();
    ctx.seed_user(UserRole::Owner).await;
    let cookie = ctx.login().await;

    let response = ctx.get("/owner/products", Some(&cookie)).await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/owner/setup"));
}

#[tokio::test]
async fn owner_with_incomplete_setup_is_redirected_to_setup() {
    let ctx = TestContext::new();
    let id = ctx.seed_user(UserRole::Owner).await;
    ctx.seed_company(&id, false).await;
    let cookie = ctx.login().await;

    let response = ctx.get("/owner/customers", Some(&cookie)).await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/owner/setup"));
}

#[tokio::test]
async fn setup_wizard_is_reachable_while_incomplete() {
    let ctx = TestContext::new();
    ctx.seed_user(UserRole::Owner).await;
    let cookie = ctx.login().await;

    let response = ctx.get("/owner/setup", Some(&cookie)).await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn completed_setup_unlocks_owner_pages() {
    let ctx = TestContext::new();
    let id = ctx.seed_user(UserRole::Owner).await;
    ctx.seed_company(&id, true).await;
    let cookie = ctx.login().await;

    let response = ctx.get("/owner/products", Some(&cookie)).await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn non_owners_are_never_redirected_to_setup() {
    let ctx = TestContext::new();
    ctx.seed_user(UserRole::Cashier).await;
    let cookie = ctx.login().await;

    let response = ctx.get("/owner/sales/new", Some(&cookie)).await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn excluded_routes_bypass_the_gate() {
    let ctx = TestContext::with_setup_policy(SetupGateConfig {
        redirect_if_not_setup: true,
        exclude_routes: vec!["/owner/products".to_owned()],
    });
    ctx.seed_user(UserRole::Owner).await;
    let cookie = ctx.login().await;

    let excluded = ctx.get("/owner/products", Some(&cookie)).await;
    assert_eq!(excluded.status(), 200);

    // Other paths are still gated
    let gated = ctx.get("/owner/customers", Some(&cookie)).await;
    assert_eq!(location(&gated).as_deref(), Some("/owner/setup"));
}

#[tokio::test]
async fn completing_the_wizard_releases_the_gate() {
    let ctx = TestContext::new();
    ctx.seed_user(UserRole::Owner).await;
    let cookie = ctx.login().await;

    let form = "logo_url=&name=Corner+Shop&activity_domain=grocery&phone=%2B1+555+0100\
                &email=owner%40cornershop.example&website=&tax_number=TX-1\
                &commercial_register_number=CR-1&address=1+Main+St&primary_color=%231d4ed8";
    let saved = ctx.post_form("/owner/setup", form, Some(&cookie)).await;
    assert_eq!(saved.status(), 303);
    assert_eq!(location(&saved).as_deref(), Some("/owner/dashboard"));

    let response = ctx.get("/owner/products", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let ctx = TestContext::new();

    let live = ctx.get("/health", None).await;
    assert_eq!(live.status(), 200);

    let ready = ctx.get("/health/ready", None).await;
    assert_eq!(ready.status(), 200);
}
