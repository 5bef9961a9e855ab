//! Read-only dish catalog supplied whole at initialization.
//!
//! The ledger performs no loading, caching, or invalidation of catalog
//! data; records are validated once when the catalog is built and treated
//! as immutable for the session.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cart::DishId;

/// Validation errors raised when building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogValidationError {
    /// A required text field is empty after trimming.
    #[error("dish field '{field}' must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Dish prices are non-negative.
    #[error("dish {id} has a negative price")]
    NegativePrice {
        /// Id of the offending dish.
        id: DishId,
    },
    /// Catalog entries are unique per dish id.
    #[error("duplicate dish id {id} in catalog")]
    DuplicateDishId {
        /// The duplicated id.
        id: DishId,
    },
}

/// Input payload for [`DishRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DishDraft {
    pub id: DishId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub image: String,
    pub ingredients: Vec<String>,
}

/// A dish as listed in the catalog, immutable during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct DishRecord {
    id: DishId,
    name: String,
    description: String,
    category: String,
    price: Decimal,
    image: String,
    ingredients: Vec<String>,
}

impl DishRecord {
    /// Validates and constructs a dish record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogValidationError`] when the name or category is
    /// empty or the price is negative.
    pub fn new(draft: DishDraft) -> Result<Self, CatalogValidationError> {
        Self::try_from(draft)
    }

    /// Unique positive identifier.
    #[must_use]
    pub fn id(&self) -> DishId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Longer description shown on the dish detail page.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Menu category the dish belongs to.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Price in currency units.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Ordered ingredient labels.
    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }
}

impl TryFrom<DishDraft> for DishRecord {
    type Error = CatalogValidationError;

    fn try_from(draft: DishDraft) -> Result<Self, Self::Error> {
        if draft.name.trim().is_empty() {
            return Err(CatalogValidationError::EmptyField { field: "name" });
        }
        if draft.category.trim().is_empty() {
            return Err(CatalogValidationError::EmptyField { field: "category" });
        }
        if draft.price < Decimal::ZERO {
            return Err(CatalogValidationError::NegativePrice { id: draft.id });
        }

        Ok(Self {
            id: draft.id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            price: draft.price,
            image: draft.image,
            ingredients: draft.ingredients,
        })
    }
}

impl<'de> Deserialize<'de> for DishRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        DishDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// The read-only dish catalog for a session.
///
/// # Examples
///
/// ```
/// use storefront::domain::{Catalog, DishDraft, DishId, DishRecord};
/// use rust_decimal::Decimal;
///
/// let dish = DishRecord::new(DishDraft {
///     id: DishId::new(4).expect("positive id"),
///     name: "Salmon nigiri".to_owned(),
///     description: "Salmon over rice".to_owned(),
///     category: "Sushi".to_owned(),
///     price: Decimal::from(180),
///     image: String::new(),
///     ingredients: vec!["Salmon".to_owned(), "Rice".to_owned()],
/// })
/// .expect("valid dish");
///
/// let catalog = Catalog::new(vec![dish]).expect("unique ids");
/// assert!(catalog.find(DishId::new(4).expect("positive id")).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    dishes: Vec<DishRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate dish ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogValidationError::DuplicateDishId`] when two
    /// records share an id.
    pub fn new(dishes: Vec<DishRecord>) -> Result<Self, CatalogValidationError> {
        let mut seen = Vec::with_capacity(dishes.len());
        for dish in &dishes {
            if seen.contains(&dish.id) {
                return Err(CatalogValidationError::DuplicateDishId { id: dish.id });
            }
            seen.push(dish.id);
        }
        Ok(Self { dishes })
    }

    /// Looks up a dish by id.
    #[must_use]
    pub fn find(&self, id: DishId) -> Option<&DishRecord> {
        self.dishes.iter().find(|dish| dish.id() == id)
    }

    /// The dishes in catalog order.
    #[must_use]
    pub fn dishes(&self) -> &[DishRecord] {
        &self.dishes
    }

    /// Number of dishes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    /// Whether the catalog lists no dishes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}
