//! Breadwinner Economy Engine
//!
//! Platform-agnostic core logic for the Breadwinner incremental baking game.
//! This crate provides the economy state, upgrade ledger, and the tick,
//! click, and purchase operations without UI, clock, or platform-specific
//! dependencies. A host supplies the clock (measured elapsed seconds) and the
//! input events, and renders the snapshots this crate produces.

pub mod constants;
pub mod numbers;
pub mod session;
pub mod shop;
pub mod snapshot;
pub mod state;
pub mod upgrades;

// Re-export commonly used types
pub use session::{GameEvent, GameSession};
pub use shop::{PurchaseError, PurchaseReceipt, purchase};
pub use snapshot::{EconomySnapshot, UpgradeView};
pub use state::EconomyState;
pub use upgrades::{
    AUTO_BAKER_ID, BAKERY_ID, CatalogError, MINIMUM_WAGE_ID, OVEN_ID, Upgrade, UpgradeEffect,
    UpgradeLedger,
};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this; the core never
/// performs I/O and never assumes a save exists.
pub trait SessionStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a session under a name.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    fn save_session(&self, name: &str, session: &GameSession) -> Result<(), Self::Error>;

    /// Load a previously saved session, or `None` if no save exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be loaded or parsed.
    fn load_session(&self, name: &str) -> Result<Option<GameSession>, Self::Error>;

    /// Delete a saved session.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_session(&self, name: &str) -> Result<(), Self::Error>;
}
