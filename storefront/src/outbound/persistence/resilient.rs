//! Degrading decorator that closes the unhandled-write-failure gap.
//!
//! Local-storage style backends fail at write time when quota runs out
//! or storage is disabled. This decorator keeps such failures from
//! ending the session: the first failed operation on the primary
//! repository logs a warning and degrades the session to in-memory-only
//! operation. Callers never
//! see a persistence error from a degraded repository; state simply stops
//! surviving the process.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::domain::cart::Cart;
use crate::domain::ports::{StateRepository, StateRepositoryError};
use crate::domain::promo::PromoCode;

use super::json_state::JsonStateRepository;
use super::memory::InMemoryKeyValueStore;

/// State repository that falls back to memory when the primary fails.
///
/// Every write lands in an in-memory mirror; the primary is kept in sync
/// until its first failure, after which it is abandoned for the rest of
/// the session. Reads prefer the primary while healthy and the mirror
/// afterwards.
#[derive(Debug)]
pub struct ResilientStateRepository<P> {
    primary: P,
    mirror: JsonStateRepository<InMemoryKeyValueStore>,
    degraded: AtomicBool,
}

impl<P> ResilientStateRepository<P>
where
    P: StateRepository,
{
    /// Wraps a primary repository.
    #[must_use]
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            mirror: JsonStateRepository::new(InMemoryKeyValueStore::new()),
            degraded: AtomicBool::new(false),
        }
    }

    /// Whether the primary has been abandoned for this session.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    fn degrade(&self, error: &StateRepositoryError) {
        if self.degraded.swap(true, Ordering::AcqRel) {
            return;
        }
        warn!(
            error = %error,
            "primary state store failed; continuing in memory for this session"
        );
    }

    fn forward_write<F>(&self, operation: F) -> Result<(), StateRepositoryError>
    where
        F: FnOnce(&P) -> Result<(), StateRepositoryError>,
    {
        if self.is_degraded() {
            debug!("primary state store degraded; write kept in memory only");
            return Ok(());
        }
        if let Err(err) = operation(&self.primary) {
            self.degrade(&err);
        }
        Ok(())
    }

    fn forward_read<T, F>(&self, operation: F) -> Result<Option<T>, StateRepositoryError>
    where
        F: FnOnce(&P) -> Result<Option<T>, StateRepositoryError>,
    {
        if self.is_degraded() {
            return Ok(None);
        }
        match operation(&self.primary) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.degrade(&err);
                Ok(None)
            }
        }
    }
}

impl<P> StateRepository for ResilientStateRepository<P>
where
    P: StateRepository,
{
    fn load_cart(&self) -> Result<Option<Cart>, StateRepositoryError> {
        match self.forward_read(StateRepository::load_cart)? {
            Some(cart) => Ok(Some(cart)),
            None => self.mirror.load_cart(),
        }
    }

    fn save_cart(&self, cart: &Cart) -> Result<(), StateRepositoryError> {
        self.mirror.save_cart(cart)?;
        self.forward_write(|primary| primary.save_cart(cart))
    }

    fn clear_cart(&self) -> Result<(), StateRepositoryError> {
        self.mirror.clear_cart()?;
        self.forward_write(StateRepository::clear_cart)
    }

    fn load_promo(&self) -> Result<Option<PromoCode>, StateRepositoryError> {
        match self.forward_read(StateRepository::load_promo)? {
            Some(promo) => Ok(Some(promo)),
            None => self.mirror.load_promo(),
        }
    }

    fn save_promo(&self, promo: &PromoCode) -> Result<(), StateRepositoryError> {
        self.mirror.save_promo(promo)?;
        self.forward_write(|primary| primary.save_promo(promo))
    }

    fn clear_promo(&self) -> Result<(), StateRepositoryError> {
        self.mirror.clear_promo()?;
        self.forward_write(StateRepository::clear_promo)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::ResilientStateRepository;
    use crate::domain::cart::{Cart, DishId, Quantity};
    use crate::domain::catalog::{DishDraft, DishRecord};
    use crate::domain::ports::{MockStateRepository, StateRepository, StateRepositoryError};

    fn sample_cart() -> Cart {
        let dish = DishRecord::new(DishDraft {
            id: DishId::new(1).expect("positive id"),
            name: "Philadelphia".to_owned(),
            description: String::new(),
            category: "Rolls".to_owned(),
            price: Decimal::from(450),
            image: String::new(),
            ingredients: Vec::new(),
        })
        .expect("valid dish");
        let mut cart = Cart::new();
        cart.add_or_increment(&dish, Quantity::ONE);
        cart
    }

    #[test]
    fn healthy_primaries_receive_every_write() {
        let mut primary = MockStateRepository::new();
        primary.expect_save_cart().times(2).returning(|_| Ok(()));

        let repo = ResilientStateRepository::new(primary);
        repo.save_cart(&sample_cart()).expect("save succeeds");
        repo.save_cart(&sample_cart()).expect("save succeeds");
        assert!(!repo.is_degraded());
    }

    #[test]
    fn first_write_failure_degrades_and_is_swallowed() {
        let mut primary = MockStateRepository::new();
        primary
            .expect_save_cart()
            .times(1)
            .returning(|_| Err(StateRepositoryError::backend("cart", "quota exceeded")));

        let repo = ResilientStateRepository::new(primary);
        repo.save_cart(&sample_cart()).expect("failure is swallowed");
        assert!(repo.is_degraded());
    }

    #[test]
    fn degraded_repositories_stop_touching_the_primary() {
        let mut primary = MockStateRepository::new();
        primary
            .expect_save_cart()
            .times(1)
            .returning(|_| Err(StateRepositoryError::backend("cart", "quota exceeded")));
        primary.expect_clear_cart().times(0);
        primary.expect_load_cart().times(0);

        let repo = ResilientStateRepository::new(primary);
        repo.save_cart(&sample_cart()).expect("failure is swallowed");
        repo.clear_cart().expect("clear is kept in memory");
        let _ = repo.load_cart().expect("load served from memory");
    }

    #[test]
    fn state_written_after_degradation_is_still_readable() {
        let mut primary = MockStateRepository::new();
        primary
            .expect_save_cart()
            .times(1)
            .returning(|_| Err(StateRepositoryError::backend("cart", "storage disabled")));

        let repo = ResilientStateRepository::new(primary);
        let cart = sample_cart();
        repo.save_cart(&cart).expect("failure is swallowed");

        let restored = repo
            .load_cart()
            .expect("load succeeds")
            .expect("mirror holds the cart");
        assert_eq!(restored, cart);
    }

    #[test]
    fn failing_reads_degrade_and_report_absent_state() {
        let mut primary = MockStateRepository::new();
        primary
            .expect_load_cart()
            .times(1)
            .returning(|| Err(StateRepositoryError::backend("cart", "storage disabled")));

        let repo = ResilientStateRepository::new(primary);
        assert_eq!(repo.load_cart().expect("load succeeds"), None);
        assert!(repo.is_degraded());
    }
}
