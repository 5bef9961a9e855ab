//! Promo codes and the read-only promo registry.
//!
//! Codes are stored uppercase and matched case-insensitively: lookup input
//! is trimmed and uppercased before comparison, so `"sushi20"` redeems a
//! registry entry stored as `SUSHI20`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised when constructing promo values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoValidationError {
    /// Codes are non-empty after trimming.
    #[error("promo code must not be empty")]
    EmptyCode,
    /// Discounts are percentages in `[0, 100]`.
    #[error("discount {value} is out of range; must be between 0 and 100")]
    DiscountOutOfRange {
        /// The offending value.
        value: u8,
    },
    /// Registry entries are unique per normalized code.
    #[error("duplicate promo code '{code}' in registry")]
    DuplicateCode {
        /// The duplicated (normalized) code.
        code: String,
    },
}

/// A discount percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    /// Validates and wraps a raw percentage.
    ///
    /// # Errors
    ///
    /// Returns [`PromoValidationError::DiscountOutOfRange`] above 100.
    pub fn new(raw: u8) -> Result<Self, PromoValidationError> {
        if raw > 100 {
            return Err(PromoValidationError::DiscountOutOfRange { value: raw });
        }
        Ok(Self(raw))
    }

    /// The raw percentage value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DiscountPercent {
    type Error = PromoValidationError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<DiscountPercent> for u8 {
    fn from(discount: DiscountPercent) -> Self {
        discount.0
    }
}

impl std::fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Input payload for [`PromoCode`] deserialization.
///
/// The persisted JSON shape is `{code, discount}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromoCodeDraft {
    pub code: String,
    pub discount: DiscountPercent,
}

/// A promo code redeemable for a percentage discount on the subtotal.
///
/// The applied promo owned by the ledger is a plain copy of one of these
/// registry entries.
///
/// # Examples
///
/// ```
/// use storefront::domain::PromoCode;
///
/// let promo = PromoCode::new(" sushi20 ", 20).expect("valid promo");
/// assert_eq!(promo.code(), "SUSHI20");
/// assert_eq!(promo.discount().get(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PromoCode {
    code: String,
    discount: DiscountPercent,
}

impl PromoCode {
    /// Validates, normalizes, and constructs a promo code.
    ///
    /// The code text is trimmed and uppercased.
    ///
    /// # Errors
    ///
    /// Returns [`PromoValidationError`] for blank codes or out-of-range
    /// discounts.
    pub fn new(code: &str, discount: u8) -> Result<Self, PromoValidationError> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(PromoValidationError::EmptyCode);
        }
        Ok(Self {
            code: normalized,
            discount: DiscountPercent::new(discount)?,
        })
    }

    /// The normalized (uppercase) code text.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// The discount percentage this code redeems.
    #[must_use]
    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }
}

impl TryFrom<PromoCodeDraft> for PromoCode {
    type Error = PromoValidationError;

    fn try_from(draft: PromoCodeDraft) -> Result<Self, Self::Error> {
        Self::new(&draft.code, draft.discount.get())
    }
}

impl<'de> Deserialize<'de> for PromoCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PromoCodeDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// The read-only promo registry for a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromoRegistry {
    codes: Vec<PromoCode>,
}

impl PromoRegistry {
    /// Builds a registry, rejecting duplicate codes.
    ///
    /// # Errors
    ///
    /// Returns [`PromoValidationError::DuplicateCode`] when two entries
    /// normalize to the same text.
    pub fn new(codes: Vec<PromoCode>) -> Result<Self, PromoValidationError> {
        let mut seen: Vec<&str> = Vec::with_capacity(codes.len());
        for promo in &codes {
            if seen.contains(&promo.code()) {
                return Err(PromoValidationError::DuplicateCode {
                    code: promo.code().to_owned(),
                });
            }
            seen.push(promo.code());
        }
        Ok(Self { codes })
    }

    /// Looks up a code with case-insensitive matching.
    ///
    /// The input is trimmed and uppercased before comparison. Blank input
    /// never matches.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&PromoCode> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return None;
        }
        self.codes.iter().find(|promo| promo.code() == normalized)
    }

    /// The registry entries in load order.
    #[must_use]
    pub fn codes(&self) -> &[PromoCode] {
        &self.codes
    }
}
