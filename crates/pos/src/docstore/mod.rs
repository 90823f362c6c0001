//! Remote document database access.
//!
//! The application's only persistence is a remote document store organised
//! as named collections of JSON documents keyed by id:
//!
//! - `users` - role + credential records keyed by tenant id
//! - `companies` - company profiles keyed by the owner's tenant id
//! - `stores`, `products`, `customers` - catalog reference data
//!
//! Access goes through the [`DocumentStore`] trait so the HTTP client
//! ([`HttpDocumentStore`]) and the in-memory store used by tests and local
//! development ([`MemoryDocumentStore`]) are interchangeable behind
//! `AppState`.
//!
//! Absence and failure are distinct: fetches return
//! `Result<Option<T>, DocStoreError>`, so callers must handle found,
//! not-found, and failed exhaustively.

mod http;
mod memory;

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

use async_trait::async_trait;
use thiserror::Error;

use tillpoint_core::{CustomerId, Email, ProductId, StoreId, TenantId};

use crate::models::{CompanyInfo, CustomerRecord, ProductRecord, StoreRecord, UserRecord};

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned an unexpected status code.
    #[error("document store returned {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
    },

    /// JSON payload could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the store.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A document exists but its payload is not the expected shape.
    #[error("invalid document in {collection}/{id}: {reason}")]
    InvalidDocument {
        /// Collection name.
        collection: String,
        /// Document id.
        id: String,
        /// What was wrong with the payload.
        reason: String,
    },
}

/// Typed access to the document store's collections.
///
/// Fetches return `Ok(None)` for absent documents; `Err` always means the
/// operation itself failed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a user record by tenant id.
    async fn fetch_user(&self, id: &TenantId) -> Result<Option<UserRecord>, DocStoreError>;

    /// Fetch a user record by login email.
    async fn fetch_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(TenantId, UserRecord)>, DocStoreError>;

    /// Create or replace a user record.
    async fn put_user(&self, id: &TenantId, user: &UserRecord) -> Result<(), DocStoreError>;

    /// Fetch the company profile owned by a tenant.
    async fn fetch_company(&self, id: &TenantId) -> Result<Option<CompanyInfo>, DocStoreError>;

    /// Create or replace a tenant's company profile.
    async fn save_company(
        &self,
        id: &TenantId,
        company: &CompanyInfo,
    ) -> Result<(), DocStoreError>;

    /// List all stores.
    async fn list_stores(&self) -> Result<Vec<StoreRecord>, DocStoreError>;

    /// Fetch a single store by id.
    async fn fetch_store(&self, id: &StoreId) -> Result<Option<StoreRecord>, DocStoreError>;

    /// Create or replace a store.
    async fn put_store(&self, store: &StoreRecord) -> Result<(), DocStoreError>;

    /// List all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, DocStoreError>;

    /// Fetch a single product by id.
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<ProductRecord>, DocStoreError>;

    /// Create or replace a product.
    async fn put_product(&self, product: &ProductRecord) -> Result<(), DocStoreError>;

    /// List all customers.
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DocStoreError>;

    /// Fetch a single customer by id.
    async fn fetch_customer(
        &self,
        id: &CustomerId,
    ) -> Result<Option<CustomerRecord>, DocStoreError>;

    /// Create or replace a customer.
    async fn put_customer(&self, customer: &CustomerRecord) -> Result<(), DocStoreError>;

    /// Cheap connectivity check used by the readiness probe.
    async fn ping(&self) -> Result<(), DocStoreError>;
}
