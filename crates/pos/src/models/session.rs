//! Session-related types.
//!
//! Types stored in the session for authentication and the in-progress sale.

use serde::{Deserialize, Serialize};

use tillpoint_core::{Email, TenantId, UserRole};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user. The
/// role is re-fetched from the document store by the setup gate rather than
/// trusted from here, so a role change takes effect without re-login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Tenant id (document key in the `users` collection).
    pub id: TenantId,
    /// User's email address.
    pub email: Email,
    /// Role at login time (display only).
    pub role: UserRole,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the in-progress sale draft.
    pub const SALE_DRAFT: &str = "sale_draft";
}
