//! Port for cart state persistence.
//!
//! The [`StateRepository`] trait defines the contract for persisting the
//! cart and the applied promo between sessions and across page contexts.
//! Adapters implement it over a string-keyed, JSON-encoded key-value
//! substrate (see the outbound persistence module). All operations are
//! synchronous: the ledger runs to completion on a single thread and the
//! store is in-process.

use thiserror::Error;

use crate::domain::cart::Cart;
use crate::domain::promo::PromoCode;

/// Errors raised by state repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateRepositoryError {
    /// The storage backend rejected or failed the operation.
    #[error("state backend failed for key '{key}': {message}")]
    Backend {
        /// The storage key involved.
        key: String,
        /// Description of the backend failure.
        message: String,
    },
    /// A stored value could not be encoded or decoded.
    #[error("stored value under '{key}' is not valid: {message}")]
    Serialization {
        /// The storage key involved.
        key: String,
        /// Description of the codec failure.
        message: String,
    },
}

impl StateRepositoryError {
    /// Builds a [`StateRepositoryError::Backend`].
    pub fn backend(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Builds a [`StateRepositoryError::Serialization`].
    pub fn serialization(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Port for cart and promo state storage.
///
/// Absent state is distinct from empty state: `load_cart` returns `None`
/// when nothing has ever been persisted, and `Some` of a possibly empty
/// cart otherwise. Saving writes the full value; clearing deletes the
/// underlying key rather than writing an empty value, so absent state
/// stays distinguishable.
#[cfg_attr(test, mockall::automock)]
pub trait StateRepository: Send + Sync {
    /// Fetches the persisted cart, if any.
    fn load_cart(&self) -> Result<Option<Cart>, StateRepositoryError>;

    /// Persists the full cart state, including an empty cart.
    fn save_cart(&self, cart: &Cart) -> Result<(), StateRepositoryError>;

    /// Deletes the persisted cart state.
    fn clear_cart(&self) -> Result<(), StateRepositoryError>;

    /// Fetches the persisted applied promo, if any.
    fn load_promo(&self) -> Result<Option<PromoCode>, StateRepositoryError>;

    /// Persists the applied promo.
    fn save_promo(&self, promo: &PromoCode) -> Result<(), StateRepositoryError>;

    /// Deletes the persisted applied promo.
    fn clear_promo(&self) -> Result<(), StateRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups always report absent state and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStateRepository;

impl StateRepository for FixtureStateRepository {
    fn load_cart(&self) -> Result<Option<Cart>, StateRepositoryError> {
        Ok(None)
    }

    fn save_cart(&self, _cart: &Cart) -> Result<(), StateRepositoryError> {
        Ok(())
    }

    fn clear_cart(&self) -> Result<(), StateRepositoryError> {
        Ok(())
    }

    fn load_promo(&self) -> Result<Option<PromoCode>, StateRepositoryError> {
        Ok(None)
    }

    fn save_promo(&self, _promo: &PromoCode) -> Result<(), StateRepositoryError> {
        Ok(())
    }

    fn clear_promo(&self) -> Result<(), StateRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FixtureStateRepository, StateRepository, StateRepositoryError};
    use crate::domain::cart::Cart;

    #[test]
    fn fixture_repository_reports_absent_state() {
        let repo = FixtureStateRepository;
        assert!(repo.load_cart().expect("fixture load succeeds").is_none());
        assert!(repo.load_promo().expect("fixture load succeeds").is_none());
    }

    #[test]
    fn fixture_repository_accepts_writes() {
        let repo = FixtureStateRepository;
        repo.save_cart(&Cart::new()).expect("fixture save succeeds");
        repo.clear_cart().expect("fixture clear succeeds");
        repo.clear_promo().expect("fixture clear succeeds");
    }

    #[test]
    fn backend_error_formats_with_key_and_message() {
        let error = StateRepositoryError::backend("cart", "disk full");
        assert_eq!(
            error.to_string(),
            "state backend failed for key 'cart': disk full"
        );
    }
}
