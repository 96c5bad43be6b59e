//! Purchase validation and application.

use thiserror::Error;

use crate::state::EconomyState;
use crate::upgrades::UpgradeLedger;

/// Expected, recoverable purchase outcomes returned to the caller. None of
/// these mutate any state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("unknown upgrade: {id}")]
    UnknownUpgrade { id: String },
    #[error("{id} is a one-time upgrade and is already owned")]
    AlreadyOwned { id: String },
    #[error("{id} costs {required} loaves but only {available} are banked")]
    InsufficientFunds {
        id: String,
        required: u64,
        available: u64,
    },
}

/// What a successful purchase did, for the caller's display and event layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub id: String,
    /// Loaves debited.
    pub cost: u64,
    /// Purchase count after this purchase.
    pub new_count: u32,
    /// Id of the upgrade whose effect a retro boost rewrote, if any.
    pub retargeted: Option<String>,
}

/// Attempt to buy an upgrade.
///
/// Validation order: lookup, one-time re-purchase, affordability. On success
/// the debit, the count increment, and the effect application happen
/// together; on any rejection nothing changes.
///
/// # Errors
///
/// `UnknownUpgrade` when the id is not in the catalog, `AlreadyOwned` for a
/// repeat purchase of a one-time upgrade, `InsufficientFunds` when the
/// balance does not cover the current cost.
pub fn purchase(
    state: &mut EconomyState,
    ledger: &mut UpgradeLedger,
    id: &str,
) -> Result<PurchaseReceipt, PurchaseError> {
    let index = ledger
        .position(id)
        .ok_or_else(|| PurchaseError::UnknownUpgrade { id: id.to_string() })?;

    let upgrade = ledger.at(index);
    if upgrade.sold_out() {
        return Err(PurchaseError::AlreadyOwned { id: id.to_string() });
    }

    let cost = upgrade.current_cost();
    if !state.can_afford(cost) {
        return Err(PurchaseError::InsufficientFunds {
            id: id.to_string(),
            required: cost,
            available: state.loaves(),
        });
    }

    state.debit(cost);
    ledger.record_purchase(index);
    let retargeted = ledger.apply_effect(index, state);

    Ok(PurchaseReceipt {
        id: id.to_string(),
        cost,
        new_count: ledger.at(index).count,
        retargeted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrades::{AUTO_BAKER_ID, MINIMUM_WAGE_ID};

    #[test]
    fn rejections_leave_state_untouched() {
        let mut state = EconomyState::new();
        let mut ledger = UpgradeLedger::standard();
        state.balance = 5.0;
        state.lifetime_total = 5.0;
        let before_state = state.clone();
        let before_ledger = ledger.clone();

        let err = purchase(&mut state, &mut ledger, AUTO_BAKER_ID).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                id: AUTO_BAKER_ID.to_string(),
                required: 10,
                available: 5,
            }
        );
        assert_eq!(state, before_state);
        assert_eq!(ledger, before_ledger);

        let err = purchase(&mut state, &mut ledger, "croissant").unwrap_err();
        assert!(matches!(err, PurchaseError::UnknownUpgrade { .. }));
        assert_eq!(state, before_state);
        assert_eq!(ledger, before_ledger);
    }

    #[test]
    fn successful_purchase_debits_and_applies() {
        let mut state = EconomyState::new();
        let mut ledger = UpgradeLedger::standard();
        state.balance = 10.0;
        state.lifetime_total = 10.0;

        let receipt = purchase(&mut state, &mut ledger, AUTO_BAKER_ID).unwrap();
        assert_eq!(receipt.cost, 10);
        assert_eq!(receipt.new_count, 1);
        assert!(receipt.retargeted.is_none());
        assert!(state.balance.abs() < f64::EPSILON);
        assert!((state.per_time_yield - 0.2).abs() < 1e-12);
        // Lifetime total is production only; spending never reduces it.
        assert!((state.lifetime_total - 10.0).abs() < f64::EPSILON);
        assert_eq!(ledger.find(AUTO_BAKER_ID).unwrap().current_cost(), 12);
    }

    #[test]
    fn one_time_upgrade_rejects_second_purchase() {
        let mut state = EconomyState::new();
        let mut ledger = UpgradeLedger::standard();
        state.balance = 2_000.0;
        state.lifetime_total = 2_000.0;

        purchase(&mut state, &mut ledger, MINIMUM_WAGE_ID).unwrap();
        let before_state = state.clone();
        let before_ledger = ledger.clone();

        let err = purchase(&mut state, &mut ledger, MINIMUM_WAGE_ID).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::AlreadyOwned {
                id: MINIMUM_WAGE_ID.to_string()
            }
        );
        assert_eq!(state, before_state);
        assert_eq!(ledger, before_ledger);
        assert_eq!(ledger.find(MINIMUM_WAGE_ID).unwrap().count, 1);
    }
}
