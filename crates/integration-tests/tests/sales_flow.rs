//! Sales flow over the full router: cart fragments, sale kinds, completion.

use rust_decimal::Decimal;

use tillpoint_core::{CustomerId, ProductId, StoreId, UserRole};
use tillpoint_integration_tests::{TestContext, body_text, location};
use tillpoint_pos::docstore::DocumentStore;
use tillpoint_pos::models::{CustomerRecord, ProductRecord, StoreRecord};

async fn sale_ready_context() -> (TestContext, String) {
    let ctx = TestContext::new();
    let id = ctx.seed_user(UserRole::Owner).await;
    ctx.seed_company(&id, true).await;

    ctx.store
        .put_store(&StoreRecord {
            id: StoreId::new("st_main"),
            name: "Main Street".to_owned(),
            location: None,
        })
        .await
        .expect("seed store");

    ctx.store
        .put_product(&ProductRecord {
            id: ProductId::new("pr_espresso"),
            name: "Espresso beans".to_owned(),
            price: Decimal::new(1000, 2),
            sku: None,
        })
        .await
        .expect("seed product");

    ctx.store
        .put_customer(&CustomerRecord {
            id: CustomerId::new("cu_luna"),
            name: "Cafe Luna".to_owned(),
            phone: None,
            email: None,
        })
        .await
        .expect("seed customer");

    let cookie = ctx.login().await;
    (ctx, cookie)
}

#[tokio::test]
async fn adding_a_product_renders_the_cart_fragment() {
    let (ctx, cookie) = sale_ready_context().await;

    let response = ctx
        .post_form(
            "/owner/sales/cart/add",
            "product_id=pr_espresso&quantity=2",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );

    let body = body_text(response).await;
    assert!(body.contains("Espresso beans"));
    assert!(body.contains("$20.00"));
}

#[tokio::test]
async fn updating_quantity_recomputes_the_line_total() {
    let (ctx, cookie) = sale_ready_context().await;

    ctx.post_form(
        "/owner/sales/cart/add",
        "product_id=pr_espresso&quantity=2",
        Some(&cookie),
    )
    .await;

    let response = ctx
        .post_form(
            "/owner/sales/cart/update",
            "product_id=pr_espresso&quantity=3",
            Some(&cookie),
        )
        .await;

    let body = body_text(response).await;
    assert!(body.contains("$30.00"));
}

#[tokio::test]
async fn updating_quantity_to_zero_empties_the_cart() {
    let (ctx, cookie) = sale_ready_context().await;

    ctx.post_form(
        "/owner/sales/cart/add",
        "product_id=pr_espresso&quantity=1",
        Some(&cookie),
    )
    .await;

    let response = ctx
        .post_form(
            "/owner/sales/cart/update",
            "product_id=pr_espresso&quantity=0",
            Some(&cookie),
        )
        .await;

    let body = body_text(response).await;
    assert!(body.contains("Cart is empty"));
}

#[tokio::test]
async fn removing_an_absent_line_is_a_noop() {
    let (ctx, cookie) = sale_ready_context().await;

    let response = ctx
        .post_form(
            "/owner/sales/cart/remove",
            "product_id=pr_unknown",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body = body_text(response).await;
    assert!(body.contains("Cart is empty"));
}

#[tokio::test]
async fn adding_an_unknown_product_is_rejected() {
    let (ctx, cookie) = sale_ready_context().await;

    let response = ctx
        .post_form(
            "/owner/sales/cart/add",
            "product_id=pr_unknown&quantity=1",
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn completion_requires_a_non_empty_cart_and_a_store() {
    let (ctx, cookie) = sale_ready_context().await;

    let empty = ctx
        .post_form("/owner/sales/complete", "", Some(&cookie))
        .await;
    assert_eq!(
        location(&empty).as_deref(),
        Some("/owner/sales/new?error=empty_cart")
    );

    ctx.post_form(
        "/owner/sales/cart/add",
        "product_id=pr_espresso&quantity=1",
        Some(&cookie),
    )
    .await;

    let no_store = ctx
        .post_form("/owner/sales/complete", "", Some(&cookie))
        .await;
    assert_eq!(
        location(&no_store).as_deref(),
        Some("/owner/sales/new?error=store_required")
    );
}

#[tokio::test]
async fn credit_sales_require_an_attached_customer() {
    let (ctx, cookie) = sale_ready_context().await;

    ctx.post_form("/owner/sales/store", "store_id=st_main", Some(&cookie))
        .await;
    ctx.post_form(
        "/owner/sales/cart/add",
        "product_id=pr_espresso&quantity=1",
        Some(&cookie),
    )
    .await;

    // Switching to a credit sale without a customer opens the warning dialog
    let kind = ctx
        .post_form("/owner/sales/kind", "kind=credit", Some(&cookie))
        .await;
    assert_eq!(
        location(&kind).as_deref(),
        Some("/owner/sales/new?warning=customer_required")
    );

    let blocked = ctx
        .post_form("/owner/sales/complete", "", Some(&cookie))
        .await;
    assert_eq!(
        location(&blocked).as_deref(),
        Some("/owner/sales/new?warning=customer_required")
    );

    // The sale page renders the blocking dialog
    let page = ctx
        .get("/owner/sales/new?warning=customer_required", Some(&cookie))
        .await;
    let body = body_text(page).await;
    assert!(body.contains("Customer required"));

    // Attaching a customer releases completion
    ctx.post_form("/owner/sales/customer", "customer_id=cu_luna", Some(&cookie))
        .await;

    let completed = ctx
        .post_form("/owner/sales/complete", "", Some(&cookie))
        .await;
    assert_eq!(
        location(&completed).as_deref(),
        Some("/owner/sales/new?success=sale_completed")
    );

    // The cart is discarded after completion
    let cart = ctx.get("/owner/sales/cart", Some(&cookie)).await;
    let body = body_text(cart).await;
    assert!(body.contains("Cart is empty"));
}

#[tokio::test]
async fn counter_sales_complete_without_a_customer() {
    let (ctx, cookie) = sale_ready_context().await;

    ctx.post_form("/owner/sales/store", "store_id=st_main", Some(&cookie))
        .await;
    ctx.post_form(
        "/owner/sales/cart/add",
        "product_id=pr_espresso&quantity=2",
        Some(&cookie),
    )
    .await;

    let completed = ctx
        .post_form("/owner/sales/complete", "", Some(&cookie))
        .await;
    assert_eq!(
        location(&completed).as_deref(),
        Some("/owner/sales/new?success=sale_completed")
    );
}
