//! Storefront core: a static menu browser's cart ledger.
//!
//! The crate owns the one piece of this system worth formalizing, the
//! cart ledger, together with its read-only collaborators (dish catalog,
//! promo registry) and persistence. There is no server, no payment
//! processing, and no rendering here: presentation layers construct a
//! [`domain::CartLedger`] over a storage adapter from [`outbound`] and
//! drive it through its operations.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use storefront::domain::{CartLedger, Quantity};
//! use storefront::menu;
//! use storefront::outbound::persistence::{InMemoryKeyValueStore, JsonStateRepository};
//!
//! let (catalog, registry) = menu::embedded().expect("embedded menu is valid");
//! let repo = Arc::new(JsonStateRepository::new(InMemoryKeyValueStore::new()));
//! let mut ledger = CartLedger::open(registry, repo);
//!
//! let dish = catalog.dishes().first().expect("catalog is non-empty");
//! ledger
//!     .add_item(dish, Quantity::ONE)
//!     .expect("in-memory store accepts writes");
//! let summary = ledger.checkout().expect("cart is non-empty");
//!
//! assert!(ledger.is_empty());
//! assert_eq!(summary.total_quantity(), 1);
//! ```

pub mod domain;
pub mod menu;
pub mod outbound;
