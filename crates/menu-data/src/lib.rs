//! Static menu dataset for the storefront core.
//!
//! This crate ships the dish catalog and promo code definitions as a
//! compiled-in JSON dataset, together with loading and validation helpers.
//! It is intentionally independent of storefront domain types to avoid
//! circular dependencies: records here are plain data that the storefront
//! converts into its validated catalog at initialization.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading the embedded dataset (the catalog is statically embedded, not
//!   fetched)
//! - Loading alternative datasets from JSON strings or files
//! - Structural validation: unique positive dish ids, non-negative prices,
//!   normalized and unique promo codes, discounts within `[0, 100]`
//!
//! # Example
//!
//! ```
//! use menu_data::Menu;
//!
//! let menu = Menu::embedded().expect("embedded dataset is valid");
//! let dish = menu.find_dish(1).expect("dish 1 exists");
//!
//! assert_eq!(dish.name, "Philadelphia");
//! assert_eq!(menu.promocodes().len(), 3);
//! ```

mod error;
mod menu;

pub use error::MenuDataError;
pub use menu::{Dish, Menu, Promotion};
