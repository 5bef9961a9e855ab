//! The cart ledger: authoritative cart state and its operations.
//!
//! One ledger instance is constructed per process/session and passed
//! explicitly to whatever presentation layer needs it; there is no
//! ambient global state. The ledger keeps the cart and applied promo in
//! memory, writes every mutation through the [`StateRepository`] port,
//! and notifies registered listeners after each persisted write.
//!
//! Line items are addressed by [`DishId`] rather than positional index,
//! which removes the stale-index hazard of index-based addressing when
//! the list shifts under a removal.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::cart::{AdjustOutcome, Cart, CartLineItem, DishId, Quantity};
use super::catalog::DishRecord;
use super::error::LedgerError;
use super::ports::{CartActivity, CartChangeListener, StateRepository};
use super::pricing::{CartTotals, CheckoutSummary};
use super::promo::{PromoCode, PromoRegistry};

/// The authoritative in-memory representation of the current cart and
/// applied promo, synchronized with persisted storage.
///
/// Cross-context consistency is last-writer-wins: each context re-reads
/// persisted state only at [`CartLedger::open`]. Within one context,
/// operations run to completion in call order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use storefront::domain::ports::FixtureStateRepository;
/// use storefront::domain::{CartLedger, Quantity};
/// use storefront::menu;
///
/// let (catalog, registry) = menu::embedded().expect("embedded menu is valid");
/// let mut ledger = CartLedger::open(registry, Arc::new(FixtureStateRepository));
///
/// let dish = catalog.dishes().first().expect("catalog is non-empty");
/// ledger
///     .add_item(dish, Quantity::new(2).expect("positive"))
///     .expect("fixture store accepts writes");
///
/// assert_eq!(ledger.total_quantity(), 2);
/// ```
pub struct CartLedger<R> {
    registry: PromoRegistry,
    repo: Arc<R>,
    listeners: Vec<Arc<dyn CartChangeListener>>,
    cart: Cart,
    promo: Option<PromoCode>,
}

impl<R> CartLedger<R>
where
    R: StateRepository,
{
    /// Opens a ledger over a state repository, restoring persisted state.
    ///
    /// Unreadable persisted values are logged and treated as absent, so a
    /// corrupt store never prevents the ledger from starting; it starts
    /// empty instead.
    pub fn open(registry: PromoRegistry, repo: Arc<R>) -> Self {
        let cart = match repo.load_cart() {
            Ok(persisted) => persisted.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "persisted cart unreadable; starting empty");
                Cart::new()
            }
        };
        let promo = match repo.load_promo() {
            Ok(persisted) => persisted,
            Err(err) => {
                warn!(error = %err, "persisted promo unreadable; starting without one");
                None
            }
        };

        Self {
            registry,
            repo,
            listeners: Vec::new(),
            cart,
            promo,
        }
    }

    /// Registers a listener notified after every persisted write.
    pub fn subscribe(&mut self, listener: Arc<dyn CartChangeListener>) {
        self.listeners.push(listener);
    }

    /// Adds a dish to the cart, merging with an existing line item.
    ///
    /// An existing line item for the same dish grows by `quantity`;
    /// otherwise a new line item is appended with a snapshot of the dish
    /// taken now. Never fails on valid input; the only error source is
    /// the persistence write.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] when the persistence write fails.
    pub fn add_item(&mut self, dish: &DishRecord, quantity: Quantity) -> Result<(), LedgerError> {
        self.cart.add_or_increment(dish, quantity);
        debug!(dish_id = %dish.id(), quantity = quantity.get(), "line item added");
        self.persist_cart()?;
        self.notify();
        Ok(())
    }

    /// Applies a signed quantity delta to the line item for `dish_id`.
    ///
    /// A resulting quantity of zero or below removes the line item and
    /// compacts the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::LineNotFound`] when the dish is not in the
    /// cart, or [`LedgerError::Storage`] when the persistence write
    /// fails.
    pub fn adjust_quantity(
        &mut self,
        dish_id: DishId,
        delta: i32,
    ) -> Result<AdjustOutcome, LedgerError> {
        let outcome = self
            .cart
            .adjust(dish_id, delta)
            .ok_or(LedgerError::LineNotFound { dish_id })?;
        debug!(dish_id = %dish_id, delta, "line item adjusted");
        self.persist_cart()?;
        self.notify();
        Ok(outcome)
    }

    /// Removes the line item for `dish_id` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::LineNotFound`] when the dish is not in the
    /// cart, or [`LedgerError::Storage`] when the persistence write
    /// fails.
    pub fn remove_line(&mut self, dish_id: DishId) -> Result<CartLineItem, LedgerError> {
        let removed = self
            .cart
            .remove(dish_id)
            .ok_or(LedgerError::LineNotFound { dish_id })?;
        debug!(dish_id = %dish_id, "line item removed");
        self.persist_cart()?;
        self.notify();
        Ok(removed)
    }

    /// Applies a promo code, replacing any promo already applied.
    ///
    /// Input is trimmed and matched case-insensitively against the
    /// registry. On a miss the ledger state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyPromoCode`] for blank input,
    /// [`LedgerError::UnknownPromoCode`] for an unregistered code, or
    /// [`LedgerError::Storage`] when the persistence write fails.
    pub fn apply_promo(&mut self, code: &str) -> Result<PromoCode, LedgerError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::EmptyPromoCode);
        }
        let normalized = trimmed.to_uppercase();
        let Some(matched) = self.registry.find(&normalized) else {
            return Err(LedgerError::UnknownPromoCode { code: normalized });
        };

        let applied = matched.clone();
        self.promo = Some(applied.clone());
        self.repo.save_promo(&applied)?;
        info!(code = applied.code(), discount = %applied.discount(), "promo code applied");
        self.notify();
        Ok(applied)
    }

    /// Clears the applied promo unconditionally.
    ///
    /// Calling this with no promo applied is a no-op that still clears
    /// the persisted key.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] when the persistence write fails.
    pub fn remove_promo(&mut self) -> Result<(), LedgerError> {
        self.promo = None;
        self.repo.clear_promo()?;
        debug!("promo code removed");
        self.notify();
        Ok(())
    }

    /// Completes the order: captures a summary, then clears everything.
    ///
    /// Destructive and terminal: the cart and applied promo are cleared
    /// in memory and in storage, and no order record is retained. The
    /// returned summary is the caller's only copy of the amounts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyCart`] when the cart holds no items
    /// (no state change, the applied promo is untouched), or
    /// [`LedgerError::Storage`] when a persistence write fails.
    pub fn checkout(&mut self) -> Result<CheckoutSummary, LedgerError> {
        if self.cart.is_empty() {
            return Err(LedgerError::EmptyCart);
        }

        let summary = CheckoutSummary::new(self.totals(), self.cart.total_quantity());
        self.cart.clear();
        self.promo = None;
        self.repo.clear_cart()?;
        self.repo.clear_promo()?;
        info!(
            total = %summary.totals().total(),
            quantity = summary.total_quantity(),
            "checkout completed"
        );
        self.notify();
        Ok(summary)
    }

    /// Sum over all line items of price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Discount amount under the applied promo; zero when none.
    #[must_use]
    pub fn discount(&self) -> Decimal {
        self.totals().discount()
    }

    /// Subtotal minus discount.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.totals().total()
    }

    /// The three amounts as one exact, unrounded value.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.cart, self.promo.as_ref())
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// The currently applied promo, if any.
    #[must_use]
    pub fn applied_promo(&self) -> Option<&PromoCode> {
        self.promo.as_ref()
    }

    /// Portions across all line items; the badge counter value.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn persist_cart(&self) -> Result<(), LedgerError> {
        self.repo.save_cart(&self.cart).map_err(LedgerError::from)
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let activity = CartActivity {
            total_quantity: self.cart.total_quantity(),
            totals: self.totals(),
            promo_applied: self.promo.is_some(),
        };
        for listener in &self.listeners {
            listener.cart_changed(&activity);
        }
    }
}
