//! Ledger-level error types.
//!
//! Every failure a ledger operation can report is locally recoverable: the
//! error is returned to the caller as a structured value and the process
//! carries on. The presentation layer decides how to surface each kind
//! (inline message, blocking alert, and so on); that mapping is not a
//! ledger concern.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cart::DishId;
use super::ports::StateRepositoryError;

/// Stable machine-readable code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The input is malformed (blank promo text).
    InvalidInput,
    /// The promo code does not exist in the registry.
    NotFound,
    /// Checkout was attempted with no items in the cart.
    EmptyCart,
    /// The addressed dish has no line item in the cart.
    LineNotFound,
    /// The persistence layer failed.
    Persistence,
}

/// Errors returned by ledger operations.
///
/// # Examples
///
/// ```
/// use storefront::domain::{ErrorCode, LedgerError};
///
/// let err = LedgerError::EmptyPromoCode;
/// assert_eq!(err.code(), ErrorCode::InvalidInput);
/// assert_eq!(err.to_string(), "enter a promo code");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The promo input was empty after trimming.
    #[error("enter a promo code")]
    EmptyPromoCode,
    /// The promo code has no registry entry.
    #[error("invalid promo code")]
    UnknownPromoCode {
        /// The normalized code that missed.
        code: String,
    },
    /// Checkout requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,
    /// The cart holds no line item for the addressed dish.
    #[error("dish {dish_id} is not in the cart")]
    LineNotFound {
        /// The dish id that missed.
        dish_id: DishId,
    },
    /// The persistence layer reported a failure.
    #[error(transparent)]
    Storage(#[from] StateRepositoryError),
}

impl LedgerError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyPromoCode => ErrorCode::InvalidInput,
            Self::UnknownPromoCode { .. } => ErrorCode::NotFound,
            Self::EmptyCart => ErrorCode::EmptyCart,
            Self::LineNotFound { .. } => ErrorCode::LineNotFound,
            Self::Storage(_) => ErrorCode::Persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ErrorCode, LedgerError};
    use crate::domain::cart::DishId;
    use crate::domain::ports::StateRepositoryError;

    #[rstest]
    #[case(LedgerError::EmptyPromoCode, ErrorCode::InvalidInput)]
    #[case(
        LedgerError::UnknownPromoCode { code: "NOPE99".to_owned() },
        ErrorCode::NotFound
    )]
    #[case(LedgerError::EmptyCart, ErrorCode::EmptyCart)]
    #[case(
        LedgerError::Storage(StateRepositoryError::backend("cart", "boom")),
        ErrorCode::Persistence
    )]
    fn codes_map_to_the_error_taxonomy(#[case] error: LedgerError, #[case] code: ErrorCode) {
        assert_eq!(error.code(), code);
    }

    #[test]
    fn line_not_found_names_the_dish() {
        let dish_id = DishId::new(7).expect("positive id");
        let error = LedgerError::LineNotFound { dish_id };
        assert_eq!(error.code(), ErrorCode::LineNotFound);
        assert_eq!(error.to_string(), "dish 7 is not in the cart");
    }

    #[test]
    fn user_facing_messages_match_the_storefront_wording() {
        assert_eq!(LedgerError::EmptyPromoCode.to_string(), "enter a promo code");
        let unknown = LedgerError::UnknownPromoCode {
            code: "NOPE99".to_owned(),
        };
        assert_eq!(unknown.to_string(), "invalid promo code");
    }
}
