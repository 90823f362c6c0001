//! User record model.

use serde::{Deserialize, Serialize};

use tillpoint_core::{Email, UserRole};

/// A user document in the `users` collection, keyed by tenant id.
///
/// Carries the role consulted by the setup gate and the password credential
/// used by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Login email, unique across the collection.
    pub email: Email,
    /// Role controlling what the identity may do.
    pub role: UserRole,
    /// Argon2 password hash.
    pub password_hash: String,
}
