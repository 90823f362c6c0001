//! Document store connectivity check.

use tillpoint_pos::docstore::DocumentStore;

/// Ping the document store and report the result.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::docstore_from_env()?;

    store.ping().await?;
    tracing::info!("Document store is reachable");

    Ok(())
}
