//! JSON codec between the state repository port and a key-value store.
//!
//! Owns the persisted layout: key `cart` holds a JSON array of line items
//! and key `appliedPromo` holds one promo object. Absent keys mean absent
//! state; clearing deletes the key rather than writing an empty value.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::cart::Cart;
use crate::domain::ports::{StateRepository, StateRepositoryError};
use crate::domain::promo::PromoCode;

use super::kv::{KeyValueStore, KeyValueStoreError};

/// Storage key holding the cart line item array.
pub const CART_KEY: &str = "cart";
/// Storage key holding the applied promo object.
pub const PROMO_KEY: &str = "appliedPromo";

/// State repository over any [`KeyValueStore`], encoding values as JSON.
#[derive(Debug, Default)]
pub struct JsonStateRepository<S> {
    store: S,
}

impl<S> JsonStateRepository<S>
where
    S: KeyValueStore,
{
    /// Wraps a key-value store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store, for layout assertions in tests.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load<T>(&self, key: &str) -> Result<Option<T>, StateRepositoryError>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.store.read(key).map_err(map_store_error)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)
            .map_err(|err| StateRepositoryError::serialization(key, err.to_string()))?;
        Ok(Some(value))
    }

    fn save<T>(&self, key: &str, value: &T) -> Result<(), StateRepositoryError>
    where
        T: Serialize,
    {
        let encoded = serde_json::to_string(value)
            .map_err(|err| StateRepositoryError::serialization(key, err.to_string()))?;
        self.store.write(key, &encoded).map_err(map_store_error)
    }

    fn clear(&self, key: &str) -> Result<(), StateRepositoryError> {
        self.store.delete(key).map_err(map_store_error)
    }
}

fn map_store_error(error: KeyValueStoreError) -> StateRepositoryError {
    match error {
        KeyValueStoreError::Backend { key, message }
        | KeyValueStoreError::InvalidKey { key, message } => {
            StateRepositoryError::Backend { key, message }
        }
    }
}

impl<S> StateRepository for JsonStateRepository<S>
where
    S: KeyValueStore,
{
    fn load_cart(&self) -> Result<Option<Cart>, StateRepositoryError> {
        self.load(CART_KEY)
    }

    fn save_cart(&self, cart: &Cart) -> Result<(), StateRepositoryError> {
        self.save(CART_KEY, cart)
    }

    fn clear_cart(&self) -> Result<(), StateRepositoryError> {
        self.clear(CART_KEY)
    }

    fn load_promo(&self) -> Result<Option<PromoCode>, StateRepositoryError> {
        self.load(PROMO_KEY)
    }

    fn save_promo(&self, promo: &PromoCode) -> Result<(), StateRepositoryError> {
        self.save(PROMO_KEY, promo)
    }

    fn clear_promo(&self) -> Result<(), StateRepositoryError> {
        self.clear(PROMO_KEY)
    }
}
