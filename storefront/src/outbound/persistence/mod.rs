//! Outbound persistence adapters for the state repository port.
//!
//! Layered like the storage it models: a string-keyed store of JSON
//! strings ([`KeyValueStore`]) underneath a typed JSON codec
//! ([`JsonStateRepository`]). Two substrates are provided, an in-memory
//! map and a directory of files with atomic writes, plus a degrading
//! decorator that keeps the session alive when the durable store fails.

mod dir_store;
mod json_state;
mod kv;
mod memory;
mod resilient;

pub use dir_store::DirKeyValueStore;
pub use json_state::{CART_KEY, JsonStateRepository, PROMO_KEY};
pub use kv::{KeyValueStore, KeyValueStoreError};
pub use memory::InMemoryKeyValueStore;
pub use resilient::ResilientStateRepository;
