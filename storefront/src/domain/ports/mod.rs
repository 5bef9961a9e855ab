//! Driven ports of the cart ledger.
//!
//! The ledger talks to the outside world through these traits: state
//! persistence and change notification. Outbound adapters live in
//! `crate::outbound`; mock implementations are generated with `mockall`
//! for unit tests.

mod events;
mod state_repository;

pub use events::{CartActivity, CartChangeListener, NullCartChangeListener};
pub use state_repository::{FixtureStateRepository, StateRepository, StateRepositoryError};

#[cfg(test)]
pub use events::MockCartChangeListener;
#[cfg(test)]
pub use state_repository::MockStateRepository;
