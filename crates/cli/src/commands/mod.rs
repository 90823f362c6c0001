//! CLI command implementations.

pub mod check;
pub mod owner;
pub mod seed;

use secrecy::SecretString;
use tillpoint_pos::config::DocStoreConfig;
use tillpoint_pos::docstore::HttpDocumentStore;

/// Build the document store client from the environment.
///
/// Only `DOCSTORE_BASE_URL` and `DOCSTORE_API_KEY` are required here; the
/// rest of the web app's configuration is irrelevant to CLI commands.
pub fn docstore_from_env() -> Result<HttpDocumentStore, Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DOCSTORE_BASE_URL")
        .map_err(|_| "Missing environment variable: DOCSTORE_BASE_URL")?;
    let api_key = std::env::var("DOCSTORE_API_KEY")
        .map_err(|_| "Missing environment variable: DOCSTORE_API_KEY")?;

    Ok(HttpDocumentStore::new(&DocStoreConfig {
        base_url,
        api_key: SecretString::from(api_key),
    }))
}
