//! Owned game session context tying state, ledger, and the event feed.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::constants::EVENT_BUFFER_CAP;
use crate::shop::{self, PurchaseError, PurchaseReceipt};
use crate::snapshot::EconomySnapshot;
use crate::state::EconomyState;
use crate::upgrades::UpgradeLedger;

/// Notifications a UI layer may subscribe to, for feedback like button
/// animation. Events never feed back into core state. Ticks are silent;
/// automatic production is reported through the `tick` return value instead
/// of a per-frame event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GameEvent {
    ManualYieldApplied { amount: f64 },
    PurchaseSucceeded { id: String, cost: u64 },
    EffectRetargeted { source: String, target: String },
}

/// One independent game instance: the economy, the upgrade ledger, and a
/// bounded buffer of undrained events.
///
/// All operations are synchronous read-modify-write on owned state; a host
/// with parallel event delivery must route them through a single owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    state: EconomyState,
    ledger: UpgradeLedger,
    #[serde(skip)]
    events: VecDeque<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// A fresh session over the standard bread-shop catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ledger(UpgradeLedger::standard())
    }

    /// A fresh session over a custom catalog.
    #[must_use]
    pub fn with_ledger(ledger: UpgradeLedger) -> Self {
        Self {
            state: EconomyState::new(),
            ledger,
            events: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    #[must_use]
    pub fn ledger(&self) -> &UpgradeLedger {
        &self.ledger
    }

    /// Apply automatic production for a measured interval; returns the amount
    /// produced. Negative or non-finite intervals are a no-op.
    pub fn tick(&mut self, elapsed_seconds: f64) -> f64 {
        self.state.tick(elapsed_seconds)
    }

    /// Apply one manual action; returns the amount granted.
    pub fn click(&mut self) -> f64 {
        let granted = self.state.click();
        self.push_event(GameEvent::ManualYieldApplied { amount: granted });
        granted
    }

    /// Attempt to buy an upgrade by id.
    ///
    /// # Errors
    ///
    /// Propagates [`PurchaseError`]; every rejection leaves the session
    /// unchanged.
    pub fn purchase(&mut self, id: &str) -> Result<PurchaseReceipt, PurchaseError> {
        let receipt = shop::purchase(&mut self.state, &mut self.ledger, id)?;
        self.push_event(GameEvent::PurchaseSucceeded {
            id: receipt.id.clone(),
            cost: receipt.cost,
        });
        if let Some(target) = &receipt.retargeted {
            self.push_event(GameEvent::EffectRetargeted {
                source: receipt.id.clone(),
                target: target.clone(),
            });
        }
        Ok(receipt)
    }

    /// Capture a display snapshot for a renderer.
    #[must_use]
    pub fn snapshot(&self) -> EconomySnapshot {
        EconomySnapshot::capture(&self.state, &self.ledger)
    }

    /// Hand all buffered events to a subscriber, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_BUFFER_CAP {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}
