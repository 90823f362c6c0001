//! Demo data seeding.
//!
//! Populates the document store with a small catalog so a fresh deployment
//! has something to sell. Safe to re-run: records are keyed by fixed ids and
//! replaced in place.

use rust_decimal::Decimal;

use tillpoint_core::{CustomerId, ProductId, StoreId};
use tillpoint_pos::docstore::DocumentStore;
use tillpoint_pos::models::{CustomerRecord, ProductRecord, StoreRecord};

/// Seed demo stores, products, and customers.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::docstore_from_env()?;

    for record in demo_stores() {
        store.put_store(&record).await?;
        tracing::info!(store_id = %record.id, name = %record.name, "Seeded store");
    }

    for record in demo_products() {
        store.put_product(&record).await?;
        tracing::info!(product_id = %record.id, name = %record.name, "Seeded product");
    }

    for record in demo_customers() {
        store.put_customer(&record).await?;
        tracing::info!(customer_id = %record.id, name = %record.name, "Seeded customer");
    }

    tracing::info!("Seeding complete");
    Ok(())
}

fn demo_stores() -> Vec<StoreRecord> {
    vec![
        StoreRecord {
            id: StoreId::new("st_main"),
            name: "Main Street".to_owned(),
            location: Some("12 Main St".to_owned()),
        },
        StoreRecord {
            id: StoreId::new("st_market"),
            name: "Market Hall".to_owned(),
            location: Some("Market Hall, Stand 4".to_owned()),
        },
    ]
}

fn demo_products() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            id: ProductId::new("pr_espresso"),
            name: "Espresso beans 1kg".to_owned(),
            price: Decimal::new(1850, 2),
            sku: Some("COF-001".to_owned()),
        },
        ProductRecord {
            id: ProductId::new("pr_grinder"),
            name: "Hand grinder".to_owned(),
            price: Decimal::new(4999, 2),
            sku: Some("EQP-010".to_owned()),
        },
        ProductRecord {
            id: ProductId::new("pr_filter"),
            name: "Paper filters (100)".to_owned(),
            price: Decimal::new(399, 2),
            sku: None,
        },
    ]
}

fn demo_customers() -> Vec<CustomerRecord> {
    vec![
        CustomerRecord {
            id: CustomerId::new("cu_cafe_luna"),
            name: "Cafe Luna".to_owned(),
            phone: Some("+1 555 0199".to_owned()),
            email: None,
        },
        CustomerRecord {
            id: CustomerId::new("cu_walkin"),
            name: "Front Desk Deli".to_owned(),
            phone: None,
            email: None,
        },
    ]
}
