//! Domain model and services of the storefront core.
//!
//! The module splits along the hexagonal seams: validated models (`cart`,
//! `catalog`, `promo`), pure computation (`pricing`), the driving service
//! (`ledger`), its driven ports (`ports`), and transport-agnostic errors
//! (`error`). Inbound presentation layers and outbound storage adapters
//! depend on this module, never the other way around.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod ports;
pub mod pricing;
pub mod promo;

pub use self::cart::{
    AdjustOutcome, Cart, CartLineItem, CartLineItemDraft, CartValidationError, DishId, Quantity,
};
pub use self::catalog::{Catalog, CatalogValidationError, DishDraft, DishRecord};
pub use self::error::{ErrorCode, LedgerError};
pub use self::ledger::CartLedger;
pub use self::pricing::{CartTotals, CheckoutSummary};
pub use self::promo::{
    DiscountPercent, PromoCode, PromoCodeDraft, PromoRegistry, PromoValidationError,
};
