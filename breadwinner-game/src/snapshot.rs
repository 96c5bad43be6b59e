//! Read-only views handed to renderers.

use serde::Serialize;

use crate::state::EconomyState;
use crate::upgrades::{Upgrade, UpgradeLedger};

/// One shop row as a renderer displays it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price of the next purchase.
    pub cost: u64,
    pub count: u32,
    /// Whether the current balance covers `cost`. False once a one-time
    /// upgrade is owned.
    pub affordable: bool,
    /// One-time upgrade already purchased; renderers hide or disable the row.
    pub sold_out: bool,
}

impl UpgradeView {
    fn capture(upgrade: &Upgrade, state: &EconomyState) -> Self {
        let cost = upgrade.current_cost();
        let sold_out = upgrade.sold_out();
        Self {
            id: upgrade.id.clone(),
            name: upgrade.name.clone(),
            description: upgrade.desc.clone(),
            cost,
            count: upgrade.count,
            affordable: !sold_out && state.can_afford(cost),
            sold_out,
        }
    }
}

/// A complete display snapshot of one game instance. Values only; producing
/// a snapshot never mutates anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomySnapshot {
    /// Whole loaves, truncated for display.
    pub loaves: u64,
    pub balance: f64,
    pub lifetime_total: f64,
    pub per_click_yield: f64,
    pub per_time_yield: f64,
    pub upgrades: Vec<UpgradeView>,
}

impl EconomySnapshot {
    #[must_use]
    pub fn capture(state: &EconomyState, ledger: &UpgradeLedger) -> Self {
        Self {
            loaves: state.loaves(),
            balance: state.balance,
            lifetime_total: state.lifetime_total,
            per_click_yield: state.per_click_yield,
            per_time_yield: state.per_time_yield,
            upgrades: ledger
                .iter()
                .map(|upgrade| UpgradeView::capture(upgrade, state))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrades::{AUTO_BAKER_ID, MINIMUM_WAGE_ID};

    #[test]
    fn affordability_tracks_balance() {
        let mut state = EconomyState::new();
        let ledger = UpgradeLedger::standard();
        state.balance = 49.9;

        let snapshot = EconomySnapshot::capture(&state, &ledger);
        assert_eq!(snapshot.loaves, 49);
        let by_id = |id: &str| {
            snapshot
                .upgrades
                .iter()
                .find(|view| view.id == id)
                .expect("standard catalog entry")
        };
        assert!(by_id(AUTO_BAKER_ID).affordable);
        assert!(!by_id("bakery").affordable);
        assert!(!by_id(MINIMUM_WAGE_ID).sold_out);
    }
}
