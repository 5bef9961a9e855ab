//! Cart change notification port.
//!
//! The ledger fires a [`CartActivity`] after every persisted write so
//! observers such as a header badge counter, or another open context
//! that wants to refresh reactively instead of only at initialization,
//! can follow
//! cart state without polling storage.

use serde::Serialize;

use crate::domain::pricing::CartTotals;

/// Snapshot of cart state after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartActivity {
    /// Portions across all line items; the badge counter value.
    pub total_quantity: u32,
    /// Exact amounts after the mutation.
    pub totals: CartTotals,
    /// Whether a promo is applied after the mutation.
    pub promo_applied: bool,
}

/// Driven port notified after every persisted cart write.
#[cfg_attr(test, mockall::automock)]
pub trait CartChangeListener: Send + Sync {
    /// Receives the post-mutation cart snapshot.
    fn cart_changed(&self, activity: &CartActivity);
}

/// No-op fixture listener for tests and hosts without observers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCartChangeListener;

impl CartChangeListener for NullCartChangeListener {
    fn cart_changed(&self, _activity: &CartActivity) {}
}
