//! Upgrade catalog, live ledger, cost curve, and the effect interpreter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AUTO_BAKER_BASE_COST, AUTO_BAKER_COST_GROWTH, AUTO_BAKER_YIELD_PER_SEC, BAKERY_BASE_COST,
    BAKERY_COST_GROWTH, BAKERY_YIELD_PER_SEC, MINIMUM_WAGE_BAKER_YIELD, MINIMUM_WAGE_COST,
    MINIMUM_WAGE_RETRO_PER_BAKER, OVEN_BASE_COST, OVEN_COST_GROWTH, OVEN_YIELD_PER_CLICK,
};
use crate::numbers::{floor_f64_to_u64, u32_to_f64, u64_to_f64};
use crate::state::EconomyState;

pub const AUTO_BAKER_ID: &str = "auto-baker";
pub const BAKERY_ID: &str = "bakery";
pub const OVEN_ID: &str = "oven";
pub const MINIMUM_WAGE_ID: &str = "minimum-wage";

/// What a purchase does to the economy, kept as data so catalogs stay
/// serializable and effects are testable without invoking code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeEffect {
    /// Add to the automatic per-second yield.
    GainPerTime(f64),
    /// Add to the per-click yield.
    GainPerClick(f64),
    /// Grant `target.count * per_owned` per-time yield immediately, then
    /// replace the target's live effect with `replacement` for every future
    /// purchase of it.
    RetroBoost {
        target: String,
        per_owned: f64,
        replacement: Box<UpgradeEffect>,
    },
}

/// One catalog entry and its live purchase record.
///
/// Only `count` and, for the target of a [`UpgradeEffect::RetroBoost`],
/// `effect` mutate over a session. Everything else is fixed at catalog
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    pub desc: String,
    /// Cost of the first purchase, in whole loaves.
    pub base_cost: u64,
    /// Geometric growth factor per purchase. Ignored for non-repeatable
    /// upgrades, whose cost stays flat at `base_cost`.
    #[serde(default)]
    pub cost_multiplier: f64,
    /// Whether the upgrade can be bought more than once.
    #[serde(default)]
    pub repeatable: bool,
    /// Purchases so far. Catalogs may pre-seed this for upgrades considered
    /// already partially owned.
    #[serde(default)]
    pub count: u32,
    pub effect: UpgradeEffect,
}

impl Upgrade {
    /// Price of the next purchase: `floor(base * multiplier^count)` for
    /// repeatable upgrades, flat `base_cost` for one-time upgrades.
    #[must_use]
    pub fn current_cost(&self) -> u64 {
        if !self.repeatable {
            return self.base_cost;
        }
        let scaled = u64_to_f64(self.base_cost) * self.cost_multiplier.powf(u32_to_f64(self.count));
        floor_f64_to_u64(scaled)
    }

    /// A one-time upgrade leaves the purchasable set after its purchase.
    #[must_use]
    pub fn sold_out(&self) -> bool {
        !self.repeatable && self.count > 0
    }
}

/// Errors raised when a catalog violates its structural invariants.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate upgrade id: {id}")]
    DuplicateId { id: String },
    #[error("upgrade {id} boosts unknown target {target}")]
    BoostTargetMissing { id: String, target: String },
    #[error("repeatable upgrade {id} has invalid cost growth {multiplier}")]
    BadCostGrowth { id: String, multiplier: f64 },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The fixed set of upgrades for one game instance, with purchase counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeLedger {
    upgrades: Vec<Upgrade>,
}

impl UpgradeLedger {
    /// Build a ledger from a custom catalog, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` on duplicate ids, retro-boost targets that do
    /// not exist in the catalog, or repeatable entries whose growth factor is
    /// non-finite or below 1.
    pub fn new(catalog: Vec<Upgrade>) -> Result<Self, CatalogError> {
        for (i, upgrade) in catalog.iter().enumerate() {
            if catalog[..i].iter().any(|other| other.id == upgrade.id) {
                return Err(CatalogError::DuplicateId {
                    id: upgrade.id.clone(),
                });
            }
            if upgrade.repeatable
                && (!upgrade.cost_multiplier.is_finite() || upgrade.cost_multiplier < 1.0)
            {
                return Err(CatalogError::BadCostGrowth {
                    id: upgrade.id.clone(),
                    multiplier: upgrade.cost_multiplier,
                });
            }
            if let UpgradeEffect::RetroBoost { target, .. } = &upgrade.effect
                && !catalog.iter().any(|other| &other.id == target)
            {
                return Err(CatalogError::BoostTargetMissing {
                    id: upgrade.id.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(Self { upgrades: catalog })
    }

    /// Parse a JSON catalog and validate it.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` when the JSON is malformed or the parsed
    /// catalog fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Vec<Upgrade> = serde_json::from_str(json)?;
        Self::new(catalog)
    }

    /// The built-in bread-shop catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            upgrades: vec![
                Upgrade {
                    id: AUTO_BAKER_ID.to_string(),
                    name: "Baker".to_string(),
                    desc: "Hire a baker: produces a loaf every five seconds.".to_string(),
                    base_cost: AUTO_BAKER_BASE_COST,
                    cost_multiplier: AUTO_BAKER_COST_GROWTH,
                    repeatable: true,
                    count: 0,
                    effect: UpgradeEffect::GainPerTime(AUTO_BAKER_YIELD_PER_SEC),
                },
                Upgrade {
                    id: BAKERY_ID.to_string(),
                    name: "Bakery".to_string(),
                    desc: "Open a bakery: produces a loaf every second.".to_string(),
                    base_cost: BAKERY_BASE_COST,
                    cost_multiplier: BAKERY_COST_GROWTH,
                    repeatable: true,
                    count: 0,
                    effect: UpgradeEffect::GainPerTime(BAKERY_YIELD_PER_SEC),
                },
                Upgrade {
                    id: OVEN_ID.to_string(),
                    name: "Oven".to_string(),
                    desc: "Upgrade your oven: produce an extra loaf per click.".to_string(),
                    base_cost: OVEN_BASE_COST,
                    cost_multiplier: OVEN_COST_GROWTH,
                    repeatable: true,
                    count: 0,
                    effect: UpgradeEffect::GainPerClick(OVEN_YIELD_PER_CLICK),
                },
                Upgrade {
                    id: MINIMUM_WAGE_ID.to_string(),
                    name: "Minimum Wage".to_string(),
                    desc: "Pay your bakers properly: every baker you employ works harder, \
                           now and in the future."
                        .to_string(),
                    base_cost: MINIMUM_WAGE_COST,
                    cost_multiplier: 0.0,
                    repeatable: false,
                    count: 0,
                    effect: UpgradeEffect::RetroBoost {
                        target: AUTO_BAKER_ID.to_string(),
                        per_owned: MINIMUM_WAGE_RETRO_PER_BAKER,
                        replacement: Box::new(UpgradeEffect::GainPerTime(
                            MINIMUM_WAGE_BAKER_YIELD,
                        )),
                    },
                },
            ],
        }
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|upgrade| upgrade.id == id)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.upgrades.iter().position(|upgrade| upgrade.id == id)
    }

    pub(crate) fn at(&self, index: usize) -> &Upgrade {
        &self.upgrades[index]
    }

    pub(crate) fn record_purchase(&mut self, index: usize) {
        self.upgrades[index].count += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    /// Interpret the live effect of the upgrade at `index` against the
    /// economy. For a retro boost this also rewrites the target's effect;
    /// the id of the rewritten target is returned so callers can surface it.
    pub(crate) fn apply_effect(
        &mut self,
        index: usize,
        state: &mut EconomyState,
    ) -> Option<String> {
        // Clone breaks the borrow between this entry and its boost target.
        let effect = self.upgrades[index].effect.clone();
        match effect {
            UpgradeEffect::GainPerTime(amount) => {
                state.per_time_yield += amount;
                None
            }
            UpgradeEffect::GainPerClick(amount) => {
                state.per_click_yield += amount;
                None
            }
            UpgradeEffect::RetroBoost {
                target,
                per_owned,
                replacement,
            } => {
                let target_index = self.position(&target)?;
                let owned = self.upgrades[target_index].count;
                state.per_time_yield += u32_to_f64(owned) * per_owned;
                self.upgrades[target_index].effect = *replacement;
                Some(target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baker(count: u32) -> Upgrade {
        Upgrade {
            id: AUTO_BAKER_ID.to_string(),
            name: "Baker".to_string(),
            desc: String::new(),
            base_cost: 10,
            cost_multiplier: 1.2,
            repeatable: true,
            count,
            effect: UpgradeEffect::GainPerTime(0.2),
        }
    }

    #[test]
    fn cost_curve_is_geometric_with_floor() {
        assert_eq!(baker(0).current_cost(), 10);
        assert_eq!(baker(1).current_cost(), 12);
        assert_eq!(baker(2).current_cost(), 14); // floor(14.4)
        assert_eq!(baker(3).current_cost(), 17); // floor(17.28)
    }

    #[test]
    fn one_time_cost_stays_flat() {
        let mut wage = Upgrade {
            id: MINIMUM_WAGE_ID.to_string(),
            name: String::new(),
            desc: String::new(),
            base_cost: 500,
            cost_multiplier: 0.0,
            repeatable: false,
            count: 0,
            effect: UpgradeEffect::GainPerTime(0.0),
        };
        assert_eq!(wage.current_cost(), 500);
        wage.count = 1;
        assert_eq!(wage.current_cost(), 500);
        assert!(wage.sold_out());
    }

    #[test]
    fn standard_catalog_validates() {
        let ledger = UpgradeLedger::standard();
        let revalidated = UpgradeLedger::new(ledger.iter().cloned().collect());
        assert!(revalidated.is_ok());
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = UpgradeLedger::new(vec![baker(0), baker(0)]);
        assert!(matches!(result, Err(CatalogError::DuplicateId { .. })));
    }

    #[test]
    fn dangling_boost_target_is_rejected() {
        let orphan = Upgrade {
            id: "wage".to_string(),
            name: String::new(),
            desc: String::new(),
            base_cost: 1,
            cost_multiplier: 0.0,
            repeatable: false,
            count: 0,
            effect: UpgradeEffect::RetroBoost {
                target: "nobody".to_string(),
                per_owned: 0.3,
                replacement: Box::new(UpgradeEffect::GainPerTime(0.5)),
            },
        };
        let result = UpgradeLedger::new(vec![orphan]);
        assert!(matches!(
            result,
            Err(CatalogError::BoostTargetMissing { .. })
        ));
    }

    #[test]
    fn shrinking_growth_on_repeatable_is_rejected() {
        let mut bad = baker(0);
        bad.cost_multiplier = 0.9;
        let result = UpgradeLedger::new(vec![bad]);
        assert!(matches!(result, Err(CatalogError::BadCostGrowth { .. })));
    }

    #[test]
    fn retro_boost_rewrites_target_effect() {
        let mut ledger = UpgradeLedger::standard();
        let mut state = EconomyState::new();
        let baker_index = ledger.position(AUTO_BAKER_ID).unwrap();
        let wage_index = ledger.position(MINIMUM_WAGE_ID).unwrap();
        ledger.upgrades[baker_index].count = 3;

        let retargeted = ledger.apply_effect(wage_index, &mut state);
        assert_eq!(retargeted.as_deref(), Some(AUTO_BAKER_ID));
        assert!((state.per_time_yield - 0.9).abs() < 1e-12);
        assert_eq!(
            ledger.find(AUTO_BAKER_ID).unwrap().effect,
            UpgradeEffect::GainPerTime(0.5)
        );
    }
}
