//! The in-progress sale owned by the operator's session.

use serde::{Deserialize, Serialize};

use tillpoint_core::cart::Cart;
use tillpoint_core::{CustomerId, StoreId};

/// Kind of sale being rung up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    /// Anonymous walk-in sale; no customer required.
    #[default]
    Counter,
    /// Credit sale charged to a customer account; a customer must be attached.
    Credit,
}

impl SaleKind {
    /// Whether this kind of sale needs a customer attached before completion.
    #[must_use]
    pub const fn requires_customer(self) -> bool {
        matches!(self, Self::Credit)
    }
}

impl std::str::FromStr for SaleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter" => Ok(Self::Counter),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("invalid sale kind: {s}")),
        }
    }
}

/// The sale in progress: selected store, optional customer, kind, and cart.
///
/// Lives in the session under [`crate::models::session_keys::SALE_DRAFT`];
/// discarded when the sale completes or the session ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleDraft {
    /// Store the sale is rung up against.
    pub store_id: Option<StoreId>,
    /// Customer the sale is attached to, when any.
    pub customer_id: Option<CustomerId>,
    /// Sale kind.
    pub kind: SaleKind,
    /// The line items.
    pub cart: Cart,
}

impl SaleDraft {
    /// Whether the draft's kind requires a customer that is not attached yet.
    #[must_use]
    pub const fn customer_missing(&self) -> bool {
        self.kind.requires_customer() && self.customer_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_sales_never_need_a_customer() {
        let draft = SaleDraft::default();
        assert!(!draft.customer_missing());
    }

    #[test]
    fn credit_sales_need_a_customer() {
        let mut draft = SaleDraft {
            kind: SaleKind::Credit,
            ..SaleDraft::default()
        };
        assert!(draft.customer_missing());

        draft.customer_id = Some(CustomerId::new("cu_1"));
        assert!(!draft.customer_missing());
    }
}
