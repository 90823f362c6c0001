//! Store route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use tillpoint_core::StoreId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::StoreRecord;
use crate::state::AppState;

/// Store display data for templates.
#[derive(Clone)]
pub struct StoreView {
    pub id: String,
    pub name: String,
    pub location: String,
}

impl From<&StoreRecord> for StoreView {
    fn from(store: &StoreRecord) -> Self {
        Self {
            id: store.id.to_string(),
            name: store.name.clone(),
            location: store.location.clone().unwrap_or_default(),
        }
    }
}

/// Store listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/index.html")]
pub struct StoresIndexTemplate {
    pub stores: Vec<StoreView>,
}

/// Store detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/show.html")]
pub struct StoreShowTemplate {
    pub store: StoreView,
}

/// New store form template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/new.html")]
pub struct NewStoreTemplate {
    pub error: Option<String>,
}

/// New store form data.
#[derive(Debug, Deserialize)]
pub struct NewStoreForm {
    pub name: String,
    pub location: String,
}

/// Display the store list.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse> {
    let stores = state.store().list_stores().await?;

    Ok(StoresIndexTemplate {
        stores: stores.iter().map(StoreView::from).collect(),
    })
}

/// Display the store detail scaffold.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let store = state
        .store()
        .fetch_store(&StoreId::new(id.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {id}")))?;

    Ok(StoreShowTemplate {
        store: StoreView::from(&store),
    })
}

/// Display the new store form.
pub async fn new_page(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    NewStoreTemplate { error: None }
}

/// Create a store and navigate back to the list.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<NewStoreForm>,
) -> Result<Response> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(NewStoreTemplate {
            error: Some("Store name is required".to_owned()),
        }
        .into_response());
    }

    let location = form.location.trim();
    let store = StoreRecord {
        id: StoreId::new(Uuid::new_v4().to_string()),
        name: name.to_owned(),
        location: (!location.is_empty()).then(|| location.to_owned()),
    };

    state.store().put_store(&store).await?;
    tracing::info!(store_id = %store.id, "Store created");

    Ok(Redirect::to("/owner/stores").into_response())
}
