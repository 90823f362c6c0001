//! Owner account management.

use tillpoint_core::{TenantId, UserRole};
use tillpoint_pos::services::AuthService;
use uuid::Uuid;

/// Create an owner account in the `users` collection.
///
/// The owner will be routed through the company setup wizard on first login.
pub async fn create(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::docstore_from_env()?;
    let auth = AuthService::new(&store);

    let id = TenantId::new(Uuid::new_v4().to_string());
    auth.create_user(&id, email, password, UserRole::Owner)
        .await?;

    tracing::info!(tenant_id = %id, email = %email, "Owner account created");
    Ok(())
}
