//! Subtotal, discount, and total computation.
//!
//! Amounts are exact `Decimal`s end to end: the discount is computed as an
//! exact fraction of the subtotal and `total = subtotal - discount` holds
//! before any rounding. Rounding to two decimal places happens once, at
//! presentation, through [`CartTotals::rounded`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::cart::Cart;
use super::promo::PromoCode;

fn to_display_scale(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// The three cart amounts, exact and unrounded.
///
/// # Examples
///
/// ```
/// use storefront::domain::{CartTotals, PromoCode};
/// use rust_decimal::Decimal;
///
/// let promo = PromoCode::new("SAKURA15", 15).expect("valid promo");
/// let totals = CartTotals::from_subtotal(Decimal::from(1280), Some(&promo));
///
/// assert_eq!(totals.subtotal(), Decimal::from(1280));
/// assert_eq!(totals.discount(), Decimal::from(192));
/// assert_eq!(totals.total(), Decimal::from(1088));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    subtotal: Decimal,
    discount: Decimal,
    total: Decimal,
}

impl CartTotals {
    /// Computes totals for a cart under an optional promo.
    #[must_use]
    pub fn compute(cart: &Cart, promo: Option<&PromoCode>) -> Self {
        Self::from_subtotal(cart.subtotal(), promo)
    }

    /// Computes totals from a known subtotal under an optional promo.
    ///
    /// The discount rate is expressed as an exact scale-two decimal
    /// (`15% == 0.15`), so the multiplication never rounds.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, promo: Option<&PromoCode>) -> Self {
        let discount = promo.map_or(Decimal::ZERO, |promo| {
            subtotal * Decimal::new(i64::from(promo.discount().get()), 2)
        });
        Self {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    /// Pre-discount sum of all line items.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Discount amount; zero when no promo is applied.
    #[must_use]
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Post-discount amount payable.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Presentation copy with every amount rounded to two decimal places.
    ///
    /// This is the only place rounding happens; the exact amounts remain
    /// untouched.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: to_display_scale(self.subtotal),
            discount: to_display_scale(self.discount),
            total: to_display_scale(self.total),
        }
    }
}

/// Result payload of a successful checkout, captured before the cart and
/// promo are cleared. No order record is retained anywhere; this summary
/// is the caller's only copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    totals: CartTotals,
    total_quantity: u32,
}

impl CheckoutSummary {
    pub(crate) fn new(totals: CartTotals, total_quantity: u32) -> Self {
        Self {
            totals,
            total_quantity,
        }
    }

    /// The exact amounts at checkout time.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    /// Number of portions across all line items at checkout time.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::CartTotals;
    use crate::domain::promo::PromoCode;

    #[test]
    fn no_promo_means_zero_discount() {
        let totals = CartTotals::from_subtotal(Decimal::from(900), None);
        assert_eq!(totals.subtotal(), Decimal::from(900));
        assert_eq!(totals.discount(), Decimal::ZERO);
        assert_eq!(totals.total(), Decimal::from(900));
    }

    #[test]
    fn discount_is_an_exact_fraction_of_the_subtotal() {
        let promo = PromoCode::new("SAKURA15", 15).expect("valid promo");
        let totals = CartTotals::from_subtotal(Decimal::from(1280), Some(&promo));
        assert_eq!(totals.discount(), Decimal::from(192));
        assert_eq!(totals.total(), Decimal::from(1088));
        assert_eq!(totals.total(), totals.subtotal() - totals.discount());
    }

    #[test]
    fn fractional_discounts_stay_exact_until_rounding() {
        // 15% of 450 is 67.5; the exact value must survive untouched.
        let promo = PromoCode::new("SAKURA15", 15).expect("valid promo");
        let totals = CartTotals::from_subtotal(Decimal::from(450), Some(&promo));
        assert_eq!(totals.discount().to_string(), "67.50");
        assert_eq!(totals.total().to_string(), "382.50");
    }

    #[test]
    fn rounding_happens_once_and_pads_to_two_places() {
        let totals = CartTotals::from_subtotal(Decimal::from(900), None).rounded();
        assert_eq!(totals.subtotal().to_string(), "900.00");
        assert_eq!(totals.discount().to_string(), "0.00");
        assert_eq!(totals.total().to_string(), "900.00");
    }

    #[test]
    fn rounded_totals_pad_fifteen_percent_of_1280() {
        let promo = PromoCode::new("SAKURA15", 15).expect("valid promo");
        let totals = CartTotals::from_subtotal(Decimal::from(1280), Some(&promo)).rounded();
        assert_eq!(totals.discount().to_string(), "192.00");
        assert_eq!(totals.total().to_string(), "1088.00");
    }
}
