//! In-memory document store.
//!
//! Backs integration tests and offline development with the same
//! [`DocumentStore`] contract as the HTTP client. Not used in production.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tillpoint_core::{CustomerId, Email, ProductId, StoreId, TenantId};

use crate::models::{CompanyInfo, CustomerRecord, ProductRecord, StoreRecord, UserRecord};

use super::{DocStoreError, DocumentStore};

/// A document store holding everything in process memory.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    users: HashMap<TenantId, UserRecord>,
    companies: HashMap<TenantId, CompanyInfo>,
    stores: Vec<StoreRecord>,
    products: Vec<ProductRecord>,
    customers: Vec<CustomerRecord>,
}

/// Replace an existing record (matched by key) or append, preserving order.
fn upsert<T: Clone>(records: &mut Vec<T>, record: &T, matches: impl Fn(&T) -> bool) {
    match records.iter_mut().find(|r| matches(r)) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn fetch_user(&self, id: &TenantId) -> Result<Option<UserRecord>, DocStoreError> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn fetch_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(TenantId, UserRecord)>, DocStoreError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .iter()
            .find(|(_, user)| &user.email == email)
            .map(|(id, user)| (id.clone(), user.clone())))
    }

    async fn put_user(&self, id: &TenantId, user: &UserRecord) -> Result<(), DocStoreError> {
        self.inner
            .write()
            .await
            .users
            .insert(id.clone(), user.clone());
        Ok(())
    }

    async fn fetch_company(&self, id: &TenantId) -> Result<Option<CompanyInfo>, DocStoreError> {
        Ok(self.inner.read().await.companies.get(id).cloned())
    }

    async fn save_company(
        &self,
        id: &TenantId,
        company: &CompanyInfo,
    ) -> Result<(), DocStoreError> {
        self.inner
            .write()
            .await
            .companies
            .insert(id.clone(), company.clone());
        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<StoreRecord>, DocStoreError> {
        Ok(self.inner.read().await.stores.clone())
    }

    async fn fetch_store(&self, id: &StoreId) -> Result<Option<StoreRecord>, DocStoreError> {
        Ok(self
            .inner
            .read()
            .await
            .stores
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn put_store(&self, store: &StoreRecord) -> Result<(), DocStoreError> {
        let mut inner = self.inner.write().await;
        upsert(&mut inner.stores, store, |s| s.id == store.id);
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, DocStoreError> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<ProductRecord>, DocStoreError> {
        Ok(self
            .inner
            .read()
            .await
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn put_product(&self, product: &ProductRecord) -> Result<(), DocStoreError> {
        let mut inner = self.inner.write().await;
        upsert(&mut inner.products, product, |p| p.id == product.id);
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, DocStoreError> {
        Ok(self.inner.read().await.customers.clone())
    }

    async fn fetch_customer(
        &self,
        id: &CustomerId,
    ) -> Result<Option<CustomerRecord>, DocStoreError> {
        Ok(self
            .inner
            .read()
            .await
            .customers
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }

    async fn put_customer(&self, customer: &CustomerRecord) -> Result<(), DocStoreError> {
        let mut inner = self.inner.write().await;
        upsert(&mut inner.customers, customer, |c| c.id == customer.id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), DocStoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tillpoint_core::UserRole;

    use super::*;

    fn owner_record() -> UserRecord {
        UserRecord {
            email: Email::parse("owner@example.com").expect("valid email"),
            role: UserRole::Owner,
            password_hash: "hash".to_owned(),
        }
    }

    #[tokio::test]
    async fn absent_documents_read_as_none() {
        let store = MemoryDocumentStore::default();
        let user = store.fetch_user(&TenantId::new("t1")).await.expect("fetch");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn users_are_found_by_id_and_email() {
        let store = MemoryDocumentStore::default();
        let id = TenantId::new("t1");
        store.put_user(&id, &owner_record()).await.expect("put");

        let by_id = store.fetch_user(&id).await.expect("fetch");
        assert!(by_id.is_some());

        let email = Email::parse("owner@example.com").expect("valid email");
        let by_email = store.fetch_user_by_email(&email).await.expect("fetch");
        assert_eq!(by_email.map(|(found, _)| found), Some(id));
    }

    #[tokio::test]
    async fn put_replaces_catalog_records_in_place() {
        let store = MemoryDocumentStore::default();
        let mut product = ProductRecord {
            id: ProductId::new("p1"),
            name: "Espresso".to_owned(),
            price: Decimal::from(3),
            sku: None,
        };
        store.put_product(&product).await.expect("put");

        product.price = Decimal::from(4);
        store.put_product(&product).await.expect("put");

        let products = store.list_products().await.expect("list");
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.price), Some(Decimal::from(4)));
    }
}
