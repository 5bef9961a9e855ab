//! Catalog and promo registry construction from the menu dataset.
//!
//! Bridges the plain records of the `menu-data` crate into validated
//! domain types. The embedded dataset is the storefront's static catalog;
//! alternative datasets (a file, a test fixture) go through the same
//! conversion.

use std::path::Path;

use menu_data::{Dish, Menu, MenuDataError, Promotion};
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    Catalog, CatalogValidationError, CartValidationError, DishDraft, DishId, DishRecord,
    PromoCode, PromoRegistry, PromoValidationError,
};

/// Errors returned while building the catalog and registry from a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// The dataset could not be loaded or failed structural validation.
    #[error("menu dataset error: {0}")]
    Dataset(#[from] MenuDataError),
    /// A dish record failed domain validation.
    #[error("invalid dish record: {0}")]
    Dish(#[from] CatalogValidationError),
    /// A dish identifier failed domain validation.
    #[error("invalid dish identifier: {0}")]
    DishId(#[from] CartValidationError),
    /// A promo code failed domain validation.
    #[error("invalid promo code: {0}")]
    Promo(#[from] PromoValidationError),
}

/// Builds the catalog and promo registry from the compiled-in dataset.
///
/// # Errors
///
/// Returns [`MenuError`] if the embedded dataset fails validation, which
/// indicates a packaging defect rather than a runtime condition.
///
/// # Examples
///
/// ```
/// use storefront::menu;
///
/// let (catalog, registry) = menu::embedded().expect("embedded menu is valid");
/// assert_eq!(catalog.len(), 18);
/// assert!(registry.find("sushi20").is_some());
/// ```
pub fn embedded() -> Result<(Catalog, PromoRegistry), MenuError> {
    from_menu(&Menu::embedded()?)
}

/// Builds the catalog and promo registry from a dataset file.
///
/// # Errors
///
/// Returns [`MenuError`] if the file cannot be read or fails validation.
pub fn from_file(path: &Path) -> Result<(Catalog, PromoRegistry), MenuError> {
    from_menu(&Menu::from_file(path)?)
}

/// Builds the catalog and promo registry from an already-loaded dataset.
///
/// # Errors
///
/// Returns [`MenuError`] if any record fails domain validation.
pub fn from_menu(menu: &Menu) -> Result<(Catalog, PromoRegistry), MenuError> {
    let dishes = menu
        .dishes()
        .iter()
        .map(dish_record)
        .collect::<Result<Vec<_>, _>>()?;
    let codes = menu
        .promocodes()
        .iter()
        .map(promo_code)
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = Catalog::new(dishes)?;
    let registry = PromoRegistry::new(codes)?;
    debug!(
        dishes = catalog.len(),
        promocodes = registry.codes().len(),
        "menu dataset loaded"
    );
    Ok((catalog, registry))
}

fn dish_record(dish: &Dish) -> Result<DishRecord, MenuError> {
    let id = DishId::new(dish.id)?;
    DishRecord::new(DishDraft {
        id,
        name: dish.name.clone(),
        description: dish.description.clone(),
        category: dish.category.clone(),
        price: dish.price,
        image: dish.image.clone(),
        ingredients: dish.ingredients.clone(),
    })
    .map_err(MenuError::from)
}

fn promo_code(promotion: &Promotion) -> Result<PromoCode, MenuError> {
    PromoCode::new(&promotion.code, promotion.discount).map_err(MenuError::from)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::embedded;
    use crate::domain::DishId;

    #[test]
    fn embedded_menu_builds_catalog_and_registry() {
        let (catalog, registry) = embedded().expect("embedded menu is valid");
        assert_eq!(catalog.len(), 18);
        assert_eq!(registry.codes().len(), 3);
    }

    #[test]
    fn embedded_catalog_keeps_the_dataset_records() {
        let (catalog, _) = embedded().expect("embedded menu is valid");
        let dish_id = DishId::new(1).expect("positive id");
        let philadelphia = catalog.find(dish_id).expect("dish 1 exists");
        assert_eq!(philadelphia.name(), "Philadelphia");
        assert_eq!(philadelphia.price(), Decimal::from(450));
        assert_eq!(philadelphia.category(), "Rolls");
        assert_eq!(philadelphia.ingredients().len(), 5);
    }

    #[test]
    fn embedded_registry_lists_the_shipped_discounts() {
        let (_, registry) = embedded().expect("embedded menu is valid");
        for (code, discount) in [("WELCOME10", 10), ("SAKURA15", 15), ("SUSHI20", 20)] {
            let promo = registry.find(code).expect("code registered");
            assert_eq!(promo.discount().get(), discount);
        }
    }
}
