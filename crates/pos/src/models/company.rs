//! Company profile model.

use serde::{Deserialize, Serialize};

use tillpoint_core::Email;

/// A tenant's business profile, one per owner identity.
///
/// Stored in the `companies` collection keyed by the owner's tenant id.
/// Created by the setup wizard and mutated by the setup form; never deleted.
/// The `setup_completed` flag gates whether the owner is forced through the
/// wizard on every owner-facing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Optional logo URL.
    pub logo_url: Option<String>,
    /// Legal or trading name.
    pub name: String,
    /// Line of business (e.g. "grocery", "electronics").
    pub activity_domain: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: Email,
    /// Optional website URL.
    pub website: Option<String>,
    /// Tax identification number.
    pub tax_number: String,
    /// Commercial register number.
    pub commercial_register_number: String,
    /// Postal address.
    pub address: String,
    /// Brand color used by the UI (hex, e.g. "#1d4ed8").
    pub primary_color: String,
    /// Whether the owner has completed the setup wizard.
    pub setup_completed: bool,
}
