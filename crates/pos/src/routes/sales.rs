//! Sale route handlers.
//!
//! The sale screen composes the store selector, the customer picker, and the
//! cart. Cart operations use HTMX fragments so the page never fully reloads
//! while ringing up a sale; the draft itself lives in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use tillpoint_core::cart::Cart;
use tillpoint_core::{CustomerId, ProductId, StoreId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{SaleDraft, SaleKind, session_keys};
use crate::routes::customers::CustomerView;
use crate::routes::format_money;
use crate::routes::products::ProductView;
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data for templates; derived purely from the session cart.
#[derive(Clone)]
pub struct CartViewModel {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartViewModel {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|line| CartItemView {
                    product_id: line.product_id.to_string(),
                    name: line.product_name.clone(),
                    quantity: line.quantity,
                    unit_price: format_money(line.unit_price),
                    line_total: format_money(line.total_price),
                })
                .collect(),
            subtotal: format_money(cart.subtotal()),
            item_count: cart.item_count(),
        }
    }
}

/// Store option display data for the store selector.
#[derive(Clone)]
pub struct StoreOptionView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

// =============================================================================
// Forms & Queries
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Store selection form data.
#[derive(Debug, Deserialize)]
pub struct SelectStoreForm {
    pub store_id: String,
}

/// Customer attachment form data.
#[derive(Debug, Deserialize)]
pub struct AttachCustomerForm {
    pub customer_id: String,
}

/// Sale kind form data.
#[derive(Debug, Deserialize)]
pub struct SetKindForm {
    pub kind: String,
}

/// Query parameters driving the sale page banners and the warning dialog.
#[derive(Debug, Deserialize)]
pub struct SaleQuery {
    pub warning: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Sale screen template.
#[derive(Template, WebTemplate)]
#[template(path = "sales/new.html")]
pub struct SaleNewTemplate {
    pub stores: Vec<StoreOptionView>,
    pub products: Vec<ProductView>,
    pub customers: Vec<CustomerView>,
    pub customer_name: Option<String>,
    pub kind_credit: bool,
    pub cart: CartViewModel,
    pub warning_open: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartViewModel,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Store selector fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/store_selector.html")]
pub struct StoreSelectorTemplate {
    pub stores: Vec<StoreOptionView>,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the sale draft from the session, or a fresh one.
async fn load_draft(session: &Session) -> SaleDraft {
    session
        .get::<SaleDraft>(session_keys::SALE_DRAFT)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Save the sale draft back to the session, logging failures.
async fn store_draft(session: &Session, draft: &SaleDraft) {
    if let Err(e) = session.insert(session_keys::SALE_DRAFT, draft).await {
        tracing::error!("Failed to save sale draft to session: {e}");
    }
}

/// Drop the sale draft (after completion).
async fn discard_draft(session: &Session) {
    if let Err(e) = session.remove::<SaleDraft>(session_keys::SALE_DRAFT).await {
        tracing::error!("Failed to discard sale draft: {e}");
    }
}

fn store_options(draft: &SaleDraft, stores: &[crate::models::StoreRecord]) -> Vec<StoreOptionView> {
    stores
        .iter()
        .map(|store| StoreOptionView {
            id: store.id.to_string(),
            name: store.name.clone(),
            selected: draft.store_id.as_ref() == Some(&store.id),
        })
        .collect()
}

// =============================================================================
// Page
// =============================================================================

/// Display the sale screen.
pub async fn new_sale(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Query(query): Query<SaleQuery>,
) -> Result<impl IntoResponse> {
    let draft = load_draft(&session).await;

    let stores = state.store().list_stores().await?;
    let products = state.store().list_products().await?;
    let customers = state.store().list_customers().await?;

    let customer_name = match &draft.customer_id {
        Some(id) => state
            .store()
            .fetch_customer(id)
            .await?
            .map(|customer| customer.name),
        None => None,
    };

    let error = query.error.as_deref().map(|code| match code {
        "empty_cart" => "Add at least one product before completing the sale".to_owned(),
        "store_required" => "Select a store before completing the sale".to_owned(),
        other => other.to_owned(),
    });

    let success = query
        .success
        .as_deref()
        .map(|_| "Sale completed".to_owned());

    Ok(SaleNewTemplate {
        stores: store_options(&draft, &stores),
        products: products.iter().map(ProductView::from).collect(),
        customers: customers.iter().map(CustomerView::from).collect(),
        customer_name,
        kind_credit: draft.kind == SaleKind::Credit,
        cart: CartViewModel::from(&draft.cart),
        warning_open: query.warning.is_some(),
        error,
        success,
    })
}

// =============================================================================
// Sale Setup Actions
// =============================================================================

/// Select the store the sale is rung up against (HTMX).
///
/// Returns the re-rendered selector fragment. The posted id is stored as-is;
/// the selector offers only known stores, and completion does not depend on
/// the id resolving.
pub async fn select_store(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<SelectStoreForm>,
) -> Result<impl IntoResponse> {
    let mut draft = load_draft(&session).await;
    draft.store_id = Some(StoreId::new(form.store_id));
    store_draft(&session, &draft).await;

    let stores = state.store().list_stores().await?;
    Ok(StoreSelectorTemplate {
        stores: store_options(&draft, &stores),
    })
}

/// Attach a customer to the sale.
pub async fn attach_customer(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<AttachCustomerForm>,
) -> Redirect {
    let mut draft = load_draft(&session).await;
    draft.customer_id = Some(CustomerId::new(form.customer_id));
    store_draft(&session, &draft).await;

    Redirect::to("/owner/sales/new")
}

/// Set the sale kind.
///
/// Switching to a kind that requires a customer while none is attached opens
/// the warning dialog on the sale screen.
pub async fn set_kind(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<SetKindForm>,
) -> Result<Redirect> {
    let kind: SaleKind = form.kind.parse().map_err(AppError::BadRequest)?;

    let mut draft = load_draft(&session).await;
    draft.kind = kind;
    let warn = draft.customer_missing();
    store_draft(&session, &draft).await;

    if warn {
        Ok(Redirect::to("/owner/sales/new?warning=customer_required"))
    } else {
        Ok(Redirect::to("/owner/sales/new"))
    }
}

// =============================================================================
// Cart Actions (HTMX fragments)
// =============================================================================

/// Cart items fragment.
pub async fn cart_items(RequireAuth(_user): RequireAuth, session: Session) -> impl IntoResponse {
    let draft = load_draft(&session).await;
    CartItemsTemplate {
        cart: CartViewModel::from(&draft.cart),
    }
}

/// Add units of a product to the cart (HTMX).
///
/// Returns the cart items fragment with an HTMX trigger to refresh the
/// count badge.
pub async fn add_to_cart(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let product_id = ProductId::new(form.product_id);
    let product = match state.store().fetch_product(&product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html("<span class=\"text-red-500\">Product not found</span>"),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch product for cart add: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Html("<span class=\"text-red-500\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    let mut draft = load_draft(&session).await;
    draft
        .cart
        .add_item(product.id, product.name, product.price, form.quantity.unwrap_or(1));
    store_draft(&session, &draft).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartViewModel::from(&draft.cart),
        },
    )
        .into_response()
}

/// Update a cart line's quantity (HTMX).
///
/// A quantity of zero removes the line.
pub async fn update_cart(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let mut draft = load_draft(&session).await;
    draft
        .cart
        .update_quantity(&ProductId::new(form.product_id), form.quantity);
    store_draft(&session, &draft).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartViewModel::from(&draft.cart),
        },
    )
        .into_response()
}

/// Remove a line from the cart (HTMX). No-op when the line is absent.
pub async fn remove_from_cart(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let mut draft = load_draft(&session).await;
    draft.cart.remove(&ProductId::new(form.product_id));
    store_draft(&session, &draft).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartViewModel::from(&draft.cart),
        },
    )
        .into_response()
}

/// Cart count badge fragment (HTMX).
pub async fn cart_count(RequireAuth(_user): RequireAuth, session: Session) -> impl IntoResponse {
    let draft = load_draft(&session).await;
    CartCountTemplate {
        count: draft.cart.item_count(),
    }
}

// =============================================================================
// Completion
// =============================================================================

/// Complete the sale: validate the draft, then discard it.
///
/// Payment capture is outside this application; completion validates the
/// draft, logs it, and clears the session state so the next sale starts
/// fresh.
pub async fn complete(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Redirect {
    let draft = load_draft(&session).await;

    if draft.cart.is_empty() {
        return Redirect::to("/owner/sales/new?error=empty_cart");
    }

    let Some(store_id) = draft.store_id.as_ref() else {
        return Redirect::to("/owner/sales/new?error=store_required");
    };

    if draft.customer_missing() {
        return Redirect::to("/owner/sales/new?warning=customer_required");
    }

    tracing::info!(
        store_id = %store_id,
        lines = draft.cart.items().len(),
        subtotal = %draft.cart.subtotal(),
        "Sale completed"
    );

    discard_draft(&session).await;
    Redirect::to("/owner/sales/new?success=sale_completed")
}
