//! Economy state and the accumulation operations (tick and click).

use serde::{Deserialize, Serialize};

use crate::constants::{STARTING_BALANCE, STARTING_PER_CLICK_YIELD, STARTING_PER_TIME_YIELD};
use crate::numbers::floor_f64_to_u64;

/// The mutable economic record for one game instance.
///
/// `balance` never goes negative through the public operations: production
/// only adds, and purchases are validated before the debit. `lifetime_total`
/// counts everything ever produced and is never debited, so
/// `lifetime_total >= balance` holds at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyState {
    /// Spendable loaves.
    #[serde(default)]
    pub balance: f64,
    /// All loaves ever produced, by clicks and automatic production.
    #[serde(default)]
    pub lifetime_total: f64,
    /// Loaves granted per manual click.
    #[serde(default = "default_per_click_yield")]
    pub per_click_yield: f64,
    /// Loaves granted per elapsed second of automatic production.
    #[serde(default)]
    pub per_time_yield: f64,
}

fn default_per_click_yield() -> f64 {
    STARTING_PER_CLICK_YIELD
}

impl Default for EconomyState {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
            lifetime_total: STARTING_BALANCE,
            per_click_yield: STARTING_PER_CLICK_YIELD,
            per_time_yield: STARTING_PER_TIME_YIELD,
        }
    }
}

impl EconomyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply automatic production for a measured interval.
    ///
    /// Returns the amount produced. Non-finite or negative intervals (a clock
    /// rollback, a NaN delta) are rejected as a no-op rather than allowed to
    /// corrupt the balance.
    pub fn tick(&mut self, elapsed_seconds: f64) -> f64 {
        if !elapsed_seconds.is_finite() || elapsed_seconds <= 0.0 {
            return 0.0;
        }
        let produced = self.per_time_yield * elapsed_seconds;
        self.credit(produced);
        produced
    }

    /// Apply one manual action. Always succeeds; returns the amount granted.
    pub fn click(&mut self) -> f64 {
        let granted = self.per_click_yield;
        self.credit(granted);
        granted
    }

    fn credit(&mut self, amount: f64) {
        self.balance += amount;
        self.lifetime_total += amount;
    }

    /// Whole loaves, as a renderer displays them.
    #[must_use]
    pub fn loaves(&self) -> u64 {
        floor_f64_to_u64(self.balance)
    }

    /// Whole-loaf floor of the balance, for renderer dirty-checking.
    #[must_use]
    pub fn balance_floor(&self) -> u64 {
        self.loaves()
    }

    #[must_use]
    pub fn can_afford(&self, cost: u64) -> bool {
        self.balance >= crate::numbers::u64_to_f64(cost)
    }

    /// Remove loaves already validated as affordable. Spending never touches
    /// `lifetime_total`.
    pub(crate) fn debit(&mut self, cost: u64) {
        debug_assert!(self.can_afford(cost));
        self.balance -= crate::numbers::u64_to_f64(cost);
    }
}
