//! Menu dataset types and JSON parsing.
//!
//! This module defines the static menu structure: dish records and promo
//! code definitions. The dataset is loaded from JSON (the compiled-in copy
//! or an external file) and validated before being handed to callers.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::MenuDataError;

/// The compiled-in menu dataset.
const EMBEDDED_MENU_JSON: &str = include_str!("../data/menu.json");

/// A single dish record as shipped in the dataset.
///
/// Records are plain data; the storefront domain performs its own
/// validation when converting them into catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dish {
    /// Unique positive identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Longer description shown on the dish detail page.
    pub description: String,
    /// Price in currency units.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    /// Menu category the dish belongs to.
    pub category: String,
    /// Ordered ingredient labels.
    pub ingredients: Vec<String>,
}

/// A promo code definition as shipped in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Promotion {
    /// Redeemable code text. Normalized to uppercase during validation.
    pub code: String,
    /// Discount percentage in `[0, 100]`.
    pub discount: u8,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMenu {
    dishes: Vec<Dish>,
    promocodes: Vec<Promotion>,
}

/// A validated menu dataset: ordered dishes plus promo code definitions.
///
/// # Example
///
/// ```
/// use menu_data::Menu;
///
/// let menu = Menu::embedded().expect("embedded dataset is valid");
/// assert!(!menu.dishes().is_empty());
/// assert!(menu.find_dish(1).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    dishes: Vec<Dish>,
    promocodes: Vec<Promotion>,
}

impl Menu {
    /// Loads the compiled-in dataset.
    ///
    /// # Errors
    ///
    /// Returns [`MenuDataError`] if the embedded JSON fails validation,
    /// which indicates a packaging defect rather than a runtime condition.
    pub fn embedded() -> Result<Self, MenuDataError> {
        Self::from_json(EMBEDDED_MENU_JSON)
    }

    /// Parses a menu dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`MenuDataError`] if:
    /// - The JSON is malformed
    /// - The dish list is empty
    /// - Any dish id is zero or duplicated
    /// - Any dish name is empty or any price negative
    /// - Any promo code is empty, duplicated, or discounts above 100
    pub fn from_json(json: &str) -> Result<Self, MenuDataError> {
        let raw: RawMenu = serde_json::from_str(json).map_err(|e| MenuDataError::ParseError {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    /// Loads a menu dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`MenuDataError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, MenuDataError> {
        let contents = fs::read_to_string(path).map_err(|e| MenuDataError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawMenu) -> Result<Self, MenuDataError> {
        if raw.dishes.is_empty() {
            return Err(MenuDataError::EmptyMenu);
        }

        let mut seen_ids = Vec::with_capacity(raw.dishes.len());
        for (index, dish) in raw.dishes.iter().enumerate() {
            if dish.id == 0 {
                return Err(MenuDataError::InvalidDishId { index });
            }
            if seen_ids.contains(&dish.id) {
                return Err(MenuDataError::DuplicateDishId { id: dish.id });
            }
            seen_ids.push(dish.id);
            if dish.name.trim().is_empty() {
                return Err(MenuDataError::EmptyDishName { id: dish.id });
            }
            if dish.price < Decimal::ZERO {
                return Err(MenuDataError::NegativePrice { id: dish.id });
            }
        }

        let promocodes = Self::normalize_promotions(raw.promocodes)?;

        Ok(Self {
            dishes: raw.dishes,
            promocodes,
        })
    }

    fn normalize_promotions(
        promotions: Vec<Promotion>,
    ) -> Result<Vec<Promotion>, MenuDataError> {
        let mut normalized: Vec<Promotion> = Vec::with_capacity(promotions.len());
        for (index, promotion) in promotions.into_iter().enumerate() {
            let code = promotion.code.trim().to_uppercase();
            if code.is_empty() {
                return Err(MenuDataError::EmptyPromoCode { index });
            }
            if normalized.iter().any(|existing| existing.code == code) {
                return Err(MenuDataError::DuplicatePromoCode { code });
            }
            if promotion.discount > 100 {
                return Err(MenuDataError::InvalidDiscount {
                    code,
                    value: promotion.discount,
                });
            }
            normalized.push(Promotion {
                code,
                discount: promotion.discount,
            });
        }
        Ok(normalized)
    }

    /// Ordered dish records.
    #[must_use]
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Promo code definitions with codes normalized to uppercase.
    #[must_use]
    pub fn promocodes(&self) -> &[Promotion] {
        &self.promocodes
    }

    /// Looks up a dish by id.
    #[must_use]
    pub fn find_dish(&self, id: u32) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.id == id)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::{Menu, MenuDataError};

    fn minimal_menu(dishes: &str, promocodes: &str) -> String {
        format!(r#"{{"dishes": {dishes}, "promocodes": {promocodes}}}"#)
    }

    const ONE_DISH: &str = r#"[{
        "id": 1, "name": "Philadelphia", "description": "roll", "price": 450,
        "image": "http://example.invalid/p.jpg", "category": "Rolls",
        "ingredients": ["Salmon", "Rice"]
    }]"#;

    #[test]
    fn embedded_dataset_is_valid() {
        let menu = Menu::embedded().expect("embedded dataset parses");
        assert_eq!(menu.dishes().len(), 18);
        assert_eq!(menu.promocodes().len(), 3);
    }

    #[test]
    fn embedded_dataset_has_unique_ids_and_positive_prices() {
        let menu = Menu::embedded().expect("embedded dataset parses");
        for dish in menu.dishes() {
            assert!(dish.id > 0);
            assert!(dish.price > Decimal::ZERO);
            assert!(!dish.ingredients.is_empty());
        }
    }

    #[test]
    fn find_dish_returns_matching_record() {
        let menu = Menu::embedded().expect("embedded dataset parses");
        let dish = menu.find_dish(1).expect("dish 1 exists");
        assert_eq!(dish.name, "Philadelphia");
        assert_eq!(dish.price, Decimal::from(450));
        assert!(menu.find_dish(999).is_none());
    }

    #[test]
    fn promo_codes_are_normalized_to_uppercase() {
        let json = minimal_menu(ONE_DISH, r#"[{"code": " sushi20 ", "discount": 20}]"#);
        let menu = Menu::from_json(&json).expect("menu parses");
        let promo = menu.promocodes().first().expect("one promo");
        assert_eq!(promo.code, "SUSHI20");
    }

    #[test]
    fn rejects_empty_dish_list() {
        let json = minimal_menu("[]", "[]");
        assert_eq!(Menu::from_json(&json), Err(MenuDataError::EmptyMenu));
    }

    #[test]
    fn rejects_duplicate_dish_ids() {
        let dishes = r#"[
            {"id": 1, "name": "A", "description": "", "price": 10,
             "image": "", "category": "Rolls", "ingredients": []},
            {"id": 1, "name": "B", "description": "", "price": 20,
             "image": "", "category": "Rolls", "ingredients": []}
        ]"#;
        let json = minimal_menu(dishes, "[]");
        assert_eq!(
            Menu::from_json(&json),
            Err(MenuDataError::DuplicateDishId { id: 1 })
        );
    }

    #[test]
    fn rejects_zero_dish_id() {
        let dishes = r#"[{"id": 0, "name": "A", "description": "", "price": 10,
             "image": "", "category": "Rolls", "ingredients": []}]"#;
        let json = minimal_menu(dishes, "[]");
        assert_eq!(
            Menu::from_json(&json),
            Err(MenuDataError::InvalidDishId { index: 0 })
        );
    }

    #[test]
    fn rejects_negative_price() {
        let dishes = r#"[{"id": 3, "name": "A", "description": "", "price": -1,
             "image": "", "category": "Rolls", "ingredients": []}]"#;
        let json = minimal_menu(dishes, "[]");
        assert_eq!(
            Menu::from_json(&json),
            Err(MenuDataError::NegativePrice { id: 3 })
        );
    }

    #[rstest]
    #[case(r#"[{"code": "", "discount": 5}]"#)]
    #[case(r#"[{"code": "   ", "discount": 5}]"#)]
    fn rejects_blank_promo_codes(#[case] promocodes: &str) {
        let json = minimal_menu(ONE_DISH, promocodes);
        assert_eq!(
            Menu::from_json(&json),
            Err(MenuDataError::EmptyPromoCode { index: 0 })
        );
    }

    #[test]
    fn rejects_duplicate_promo_codes_after_normalization() {
        let promocodes = r#"[
            {"code": "SUSHI20", "discount": 20},
            {"code": "sushi20", "discount": 10}
        ]"#;
        let json = minimal_menu(ONE_DISH, promocodes);
        assert_eq!(
            Menu::from_json(&json),
            Err(MenuDataError::DuplicatePromoCode {
                code: "SUSHI20".to_owned()
            })
        );
    }

    #[test]
    fn rejects_discount_above_one_hundred() {
        let json = minimal_menu(ONE_DISH, r#"[{"code": "BIG", "discount": 101}]"#);
        assert_eq!(
            Menu::from_json(&json),
            Err(MenuDataError::InvalidDiscount {
                code: "BIG".to_owned(),
                value: 101
            })
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"{"dishes": [], "promocodes": [], "extra": true}"#;
        assert!(matches!(
            Menu::from_json(json),
            Err(MenuDataError::ParseError { .. })
        ));
    }
}
