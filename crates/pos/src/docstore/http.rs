//! HTTP document store client.
//!
//! Speaks the store's JSON API with `reqwest`:
//!
//! - `GET  {base}/v1/{collection}/{id}` - 200 with the document, or 404
//! - `PUT  {base}/v1/{collection}/{id}` - create or replace, 204
//! - `GET  {base}/v1/{collection}` - 200 with `{"documents": [...]}`;
//!   an optional `?field=value` pair filters server-side
//! - `GET  {base}/v1/ping` - connectivity check
//!
//! Every request carries the API key in `X-Api-Key`. A 429 with
//! `Retry-After` surfaces as [`DocStoreError::RateLimited`]. Catalog list
//! reads are cached for 60 seconds with `moka` and invalidated on writes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;

use tillpoint_core::{CustomerId, Email, ProductId, StoreId, TenantId};

use crate::config::DocStoreConfig;
use crate::models::{CompanyInfo, CustomerRecord, ProductRecord, StoreRecord, UserRecord};

use super::{DocStoreError, DocumentStore};

/// How long catalog list responses are served from cache.
const LIST_CACHE_TTL: Duration = Duration::from_secs(60);

/// Cached list payloads, one variant per cached collection.
#[derive(Clone)]
enum CachedList {
    Stores(Vec<StoreRecord>),
    Products(Vec<ProductRecord>),
    Customers(Vec<CustomerRecord>),
}

/// Envelope for collection listings.
#[derive(serde::Deserialize)]
struct ListResponse<T> {
    documents: Vec<T>,
}

/// A document paired with its collection key, used by filtered lookups.
#[derive(serde::Deserialize)]
struct KeyedDocument<T> {
    id: String,
    document: T,
}

/// Client for the remote document store.
#[derive(Clone)]
pub struct HttpDocumentStore {
    inner: Arc<HttpDocumentStoreInner>,
}

struct HttpDocumentStoreInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    lists: Cache<&'static str, CachedList>,
}

impl HttpDocumentStore {
    /// Create a new document store client.
    #[must_use]
    pub fn new(config: &DocStoreConfig) -> Self {
        let lists = Cache::builder()
            .max_capacity(16)
            .time_to_live(LIST_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(HttpDocumentStoreInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                api_key: config.api_key.expose_secret().to_owned(),
                lists,
            }),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{collection}", self.inner.base_url)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/v1/{collection}/{id}", self.inner.base_url)
    }

    /// Run a GET and surface rate limiting and unexpected statuses.
    ///
    /// Returns `Ok(None)` for 404 and the raw body text otherwise.
    async fn get_text(&self, url: &str) -> Result<Option<String>, DocStoreError> {
        let response = self
            .inner
            .client
            .get(url)
            .header("X-Api-Key", &self.inner.api_key)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DocStoreError::RateLimited(retry_after_seconds(&response)));
        }

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %text.chars().take(200).collect::<String>(),
                "Document store returned non-success status"
            );
            return Err(DocStoreError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(Some(text))
    }

    /// Fetch a single document.
    async fn get_doc<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, DocStoreError> {
        let url = self.document_url(collection, id);
        let Some(text) = self.get_text(&url).await? else {
            return Ok(None);
        };

        let doc = serde_json::from_str(&text).map_err(|e| DocStoreError::InvalidDocument {
            collection: collection.to_owned(),
            id: id.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Some(doc))
    }

    /// Create or replace a single document.
    async fn put_doc<T: Serialize + Sync>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<(), DocStoreError> {
        let url = self.document_url(collection, id);
        let response = self
            .inner
            .client
            .put(&url)
            .header("X-Api-Key", &self.inner.api_key)
            .json(doc)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DocStoreError::RateLimited(retry_after_seconds(&response)));
        }

        if !status.is_success() {
            return Err(DocStoreError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(())
    }

    /// List a collection, optionally filtered by a single field.
    async fn list_docs<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<T>, DocStoreError> {
        let mut url = self.collection_url(collection);
        if let Some((field, value)) = filter {
            url = format!("{url}?{field}={}", urlencoding::encode(value));
        }

        let Some(text) = self.get_text(&url).await? else {
            // A 404 on a collection listing means the collection is empty.
            return Ok(Vec::new());
        };

        let list: ListResponse<T> = serde_json::from_str(&text)?;
        Ok(list.documents)
    }
}

/// Parse the `Retry-After` header, defaulting to one second.
fn retry_after_seconds(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1)
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch_user(&self, id: &TenantId) -> Result<Option<UserRecord>, DocStoreError> {
        self.get_doc("users", id.as_str()).await
    }

    async fn fetch_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(TenantId, UserRecord)>, DocStoreError> {
        let mut matches: Vec<KeyedDocument<UserRecord>> = self
            .list_docs("users", Some(("email", email.as_str())))
            .await?;

        Ok(matches
            .pop()
            .map(|keyed| (TenantId::new(keyed.id), keyed.document)))
    }

    async fn put_user(&self, id: &TenantId, user: &UserRecord) -> Result<(), DocStoreError> {
        self.put_doc("users", id.as_str(), user).await
    }

    async fn fetch_company(&self, id: &TenantId) -> Result<Option<CompanyInfo>, DocStoreError> {
        self.get_doc("companies", id.as_str()).await
    }

    async fn save_company(
        &self,
        id: &TenantId,
        company: &CompanyInfo,
    ) -> Result<(), DocStoreError> {
        self.put_doc("companies", id.as_str(), company).await
    }

    async fn list_stores(&self) -> Result<Vec<StoreRecord>, DocStoreError> {
        if let Some(CachedList::Stores(stores)) = self.inner.lists.get("stores").await {
            return Ok(stores);
        }

        let stores: Vec<StoreRecord> = self.list_docs("stores", None).await?;
        self.inner
            .lists
            .insert("stores", CachedList::Stores(stores.clone()))
            .await;
        Ok(stores)
    }

    async fn fetch_store(&self, id: &StoreId) -> Result<Option<StoreRecord>, DocStoreError> {
        self.get_doc("stores", id.as_str()).await
    }

    async fn put_store(&self, store: &StoreRecord) -> Result<(), DocStoreError> {
        self.put_doc("stores", store.id.as_str(), store).await?;
        self.inner.lists.invalidate("stores").await;
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, DocStoreError> {
        if let Some(CachedList::Products(products)) = self.inner.lists.get("products").await {
            return Ok(products);
        }

        let products: Vec<ProductRecord> = self.list_docs("products", None).await?;
        self.inner
            .lists
            .insert("products", CachedList::Products(products.clone()))
            .await;
        Ok(products)
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<ProductRecord>, DocStoreError> {
        self.get_doc("products", id.as_str()).await
    }

    async fn put_product(&self, product: &ProductRecord) -> Result<(), DocStoreError> {
        self.put_doc("products", product.id.as_str(), product).await?;
        self.inner.lists.invalidate("products").await;
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DocStoreError> {
        if let Some(CachedList::Customers(customers)) = self.inner.lists.get("customers").await {
            return Ok(customers);
        }

        let customers: Vec<CustomerRecord> = self.list_docs("customers", None).await?;
        self.inner
            .lists
            .insert("customers", CachedList::Customers(customers.clone()))
            .await;
        Ok(customers)
    }

    async fn fetch_customer(
        &self,
        id: &CustomerId,
    ) -> Result<Option<CustomerRecord>, DocStoreError> {
        self.get_doc("customers", id.as_str()).await
    }

    async fn put_customer(&self, customer: &CustomerRecord) -> Result<(), DocStoreError> {
        self.put_doc("customers", customer.id.as_str(), customer)
            .await?;
        self.inner.lists.invalidate("customers").await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DocStoreError> {
        let url = format!("{}/v1/ping", self.inner.base_url);
        self.get_text(&url).await?;
        Ok(())
    }
}
