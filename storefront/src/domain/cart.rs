//! Cart state: line items and the ordered cart sequence.
//!
//! Line items carry a price/name/image snapshot taken from the catalog at
//! insertion time, so a cart renders and totals without the catalog. The
//! cart upholds two invariants: at most one line item per dish id, and no
//! line item with a quantity below one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::DishRecord;

/// Validation errors raised when constructing cart values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartValidationError {
    /// Dish ids are positive integers; zero is reserved as invalid.
    #[error("dish id must be positive")]
    ZeroDishId,
    /// Quantities start at one; zero-quantity line items do not exist.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// Snapshot prices are non-negative.
    #[error("line item price must not be negative")]
    NegativePrice,
    /// Snapshot names are non-empty.
    #[error("line item name must not be empty")]
    EmptyName,
}

/// Identifier of a dish in the catalog: a positive integer.
///
/// # Examples
///
/// ```
/// use storefront::domain::DishId;
///
/// let id = DishId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(DishId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DishId(u32);

impl DishId {
    /// Validates and wraps a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CartValidationError::ZeroDishId`] for zero.
    pub fn new(raw: u32) -> Result<Self, CartValidationError> {
        if raw == 0 {
            return Err(CartValidationError::ZeroDishId);
        }
        Ok(Self(raw))
    }

    /// The raw identifier value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DishId {
    type Error = CartValidationError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<DishId> for u32 {
    fn from(id: DishId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line item quantity: an integer of at least one.
///
/// Non-positive quantities are rejected uniformly at construction, so a
/// zero-quantity line item is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A quantity of one, the minimum.
    pub const ONE: Self = Self(1);

    /// Validates and wraps a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartValidationError::ZeroQuantity`] for zero.
    pub fn new(raw: u32) -> Result<Self, CartValidationError> {
        if raw == 0 {
            return Err(CartValidationError::ZeroQuantity);
        }
        Ok(Self(raw))
    }

    /// The raw quantity value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CartValidationError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input payload for [`CartLineItem`] deserialization.
///
/// The persisted JSON shape is `{dishId, name, price, quantity, image}`
/// with `price` as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CartLineItemDraft {
    pub dish_id: DishId,
    pub name: String,
    pub price: Decimal,
    pub quantity: Quantity,
    pub image: String,
}

/// One entry in the cart, uniquely keyed by dish id.
///
/// Holds a self-contained snapshot of the dish taken at insertion time;
/// the snapshot is never re-read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CartLineItem {
    dish_id: DishId,
    name: String,
    price: Decimal,
    quantity: Quantity,
    image: String,
}

impl CartLineItem {
    /// Builds a line item by snapshotting a catalog dish.
    #[must_use]
    pub fn snapshot(dish: &DishRecord, quantity: Quantity) -> Self {
        Self {
            dish_id: dish.id(),
            name: dish.name().to_owned(),
            price: dish.price(),
            quantity,
            image: dish.image().to_owned(),
        }
    }

    /// The dish this line item refers to.
    #[must_use]
    pub fn dish_id(&self) -> DishId {
        self.dish_id
    }

    /// Name snapshot taken at insertion time.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unit price snapshot taken at insertion time.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Current quantity, always at least one.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Image reference snapshot taken at insertion time.
    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity.get())
    }
}

impl TryFrom<CartLineItemDraft> for CartLineItem {
    type Error = CartValidationError;

    fn try_from(draft: CartLineItemDraft) -> Result<Self, Self::Error> {
        if draft.name.trim().is_empty() {
            return Err(CartValidationError::EmptyName);
        }
        if draft.price < Decimal::ZERO {
            return Err(CartValidationError::NegativePrice);
        }

        Ok(Self {
            dish_id: draft.dish_id,
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
            image: draft.image,
        })
    }
}

impl<'de> Deserialize<'de> for CartLineItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CartLineItemDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Outcome of a quantity adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdjustOutcome {
    /// The line item remains with the given quantity.
    Updated(Quantity),
    /// The adjustment dropped the quantity to zero or below; the line item
    /// was removed and is returned.
    Removed(CartLineItem),
}

/// The ordered cart sequence.
///
/// Insertion order is preserved for stable display. Serializes as a plain
/// JSON array of line items; deserialization re-establishes the
/// one-line-per-dish invariant by merging any duplicate entries.
///
/// # Examples
///
/// ```
/// use storefront::domain::{Cart, DishDraft, DishId, DishRecord, Quantity};
/// use rust_decimal::Decimal;
///
/// let dish = DishRecord::new(DishDraft {
///     id: DishId::new(1).expect("positive id"),
///     name: "Philadelphia".to_owned(),
///     description: "Classic roll".to_owned(),
///     category: "Rolls".to_owned(),
///     price: Decimal::from(450),
///     image: String::new(),
///     ingredients: vec![],
/// })
/// .expect("valid dish");
///
/// let mut cart = Cart::new();
/// cart.add_or_increment(&dish, Quantity::new(2).expect("positive"));
/// cart.add_or_increment(&dish, Quantity::ONE);
///
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.total_quantity(), 3);
/// assert_eq!(cart.subtotal(), Decimal::from(1350));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from loose line items, merging duplicates.
    ///
    /// Duplicate dish ids are folded into the first occurrence, summing
    /// quantities and keeping the first snapshot; first-seen order is
    /// preserved. Persisted carts written by this crate never contain
    /// duplicates, so the merge only matters for foreign data.
    #[must_use]
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(item.dish_id) {
                Some(position) => cart.grow_quantity(position, item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Adds a dish snapshot, merging with an existing line item.
    ///
    /// If a line item with the same dish id exists its quantity grows by
    /// `quantity`; otherwise a new line item is appended at the end of the
    /// sequence with a fresh snapshot of the dish.
    pub fn add_or_increment(&mut self, dish: &DishRecord, quantity: Quantity) {
        match self.position(dish.id()) {
            Some(position) => self.grow_quantity(position, quantity),
            None => self.items.push(CartLineItem::snapshot(dish, quantity)),
        }
    }

    /// Applies a signed quantity delta to the line item for `dish_id`.
    ///
    /// A resulting quantity of zero or below removes the line item and
    /// compacts the sequence. Returns `None` when the dish is not in the
    /// cart.
    pub fn adjust(&mut self, dish_id: DishId, delta: i32) -> Option<AdjustOutcome> {
        let position = self.position(dish_id)?;
        let current = self.items.get(position)?;
        let adjusted = i64::from(current.quantity.0) + i64::from(delta);

        if adjusted <= 0 {
            return Some(AdjustOutcome::Removed(self.items.remove(position)));
        }

        let quantity = Quantity(u32::try_from(adjusted).unwrap_or(u32::MAX));
        let item = self.items.get_mut(position)?;
        item.quantity = quantity;
        Some(AdjustOutcome::Updated(quantity))
    }

    /// Removes the line item for `dish_id` unconditionally.
    ///
    /// Returns the removed item, or `None` when the dish is not in the
    /// cart.
    pub fn remove(&mut self, dish_id: DishId) -> Option<CartLineItem> {
        let position = self.position(dish_id)?;
        Some(self.items.remove(position))
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Looks up the line item for `dish_id`.
    #[must_use]
    pub fn find(&self, dish_id: DishId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.dish_id == dish_id)
    }

    fn position(&self, dish_id: DishId) -> Option<usize> {
        self.items.iter().position(|item| item.dish_id == dish_id)
    }

    fn grow_quantity(&mut self, position: usize, quantity: Quantity) {
        if let Some(item) = self.items.get_mut(position) {
            item.quantity = Quantity(item.quantity.0.saturating_add(quantity.0));
        }
    }

    /// Sum over all line items of price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Total number of portions across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |sum, item| sum.saturating_add(item.quantity.0))
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<CartLineItem>::deserialize(deserializer)?;
        Ok(Self::from_items(items))
    }
}

#[cfg(test)]
mod tests;
