//! Error types for the menu-data crate.
//!
//! Semantic error enums for menu loading and validation, following the
//! project's error handling conventions with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating a menu dataset.
///
/// These errors cover file I/O, JSON parsing, and the structural checks
/// performed before a dataset is handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuDataError {
    /// The menu file could not be read.
    #[error("failed to read menu file at '{path}': {message}")]
    IoError {
        /// Path to the menu file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The menu JSON is malformed or missing required fields.
    #[error("invalid menu JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The dataset contains no dishes.
    #[error("menu contains no dishes")]
    EmptyMenu,

    /// A dish identifier is zero.
    #[error("dish at index {index} has id 0; dish ids must be positive")]
    InvalidDishId {
        /// Index of the offending dish in the dataset.
        index: usize,
    },

    /// Two dishes share the same identifier.
    #[error("duplicate dish id {id} in menu")]
    DuplicateDishId {
        /// The duplicated dish id.
        id: u32,
    },

    /// A dish name is empty after trimming.
    #[error("dish {id} has an empty name")]
    EmptyDishName {
        /// Id of the offending dish.
        id: u32,
    },

    /// A dish price is negative.
    #[error("dish {id} has a negative price")]
    NegativePrice {
        /// Id of the offending dish.
        id: u32,
    },

    /// A promo code is empty after trimming.
    #[error("promo code at index {index} is empty")]
    EmptyPromoCode {
        /// Index of the offending promo code in the dataset.
        index: usize,
    },

    /// Two promo codes normalize to the same text.
    #[error("duplicate promo code '{code}' in menu")]
    DuplicatePromoCode {
        /// The duplicated (normalized) code.
        code: String,
    },

    /// A promo discount lies outside the valid percentage range.
    #[error("promo code '{code}' has discount {value}; must be between 0 and 100")]
    InvalidDiscount {
        /// The offending promo code.
        code: String,
        /// The out-of-range discount value.
        value: u8,
    },
}
