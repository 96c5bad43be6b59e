//! Centralized balance and tuning constants for the Breadwinner economy.
//!
//! These values define the deterministic math for the core loop. Keeping them
//! together ensures that balance can only be adjusted via code changes
//! reviewed in version control, rather than through external JSON assets.

// Starting state -----------------------------------------------------------
pub(crate) const STARTING_BALANCE: f64 = 0.0;
pub(crate) const STARTING_PER_CLICK_YIELD: f64 = 1.0;
pub(crate) const STARTING_PER_TIME_YIELD: f64 = 0.0;

// Standard catalog tuning --------------------------------------------------
pub(crate) const AUTO_BAKER_BASE_COST: u64 = 10;
pub(crate) const AUTO_BAKER_COST_GROWTH: f64 = 1.2;
pub(crate) const AUTO_BAKER_YIELD_PER_SEC: f64 = 0.2;

pub(crate) const BAKERY_BASE_COST: u64 = 50;
pub(crate) const BAKERY_COST_GROWTH: f64 = 1.3;
pub(crate) const BAKERY_YIELD_PER_SEC: f64 = 1.0;

pub(crate) const OVEN_BASE_COST: u64 = 100;
pub(crate) const OVEN_COST_GROWTH: f64 = 1.5;
pub(crate) const OVEN_YIELD_PER_CLICK: f64 = 1.0;

pub(crate) const MINIMUM_WAGE_COST: u64 = 500;
/// Immediate per-time bonus per baker already hired when the wage hike lands.
pub(crate) const MINIMUM_WAGE_RETRO_PER_BAKER: f64 = 0.3;
/// Per-purchase baker yield after the wage hike replaces the baker effect.
pub(crate) const MINIMUM_WAGE_BAKER_YIELD: f64 = 0.5;

// Session ------------------------------------------------------------------
/// Oldest events are discarded past this point if no consumer drains them.
pub(crate) const EVENT_BUFFER_CAP: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeatable_cost_curves_escalate() {
        assert!(AUTO_BAKER_COST_GROWTH > 1.0);
        assert!(BAKERY_COST_GROWTH > 1.0);
        assert!(OVEN_COST_GROWTH > 1.0);
    }

    #[test]
    fn wage_hike_strictly_improves_bakers() {
        assert!(MINIMUM_WAGE_BAKER_YIELD > AUTO_BAKER_YIELD_PER_SEC);
        assert!(MINIMUM_WAGE_RETRO_PER_BAKER > 0.0);
    }

    #[test]
    fn tiers_are_ordered_by_price() {
        assert!(AUTO_BAKER_BASE_COST < BAKERY_BASE_COST);
        assert!(BAKERY_BASE_COST < OVEN_BASE_COST);
        assert!(OVEN_BASE_COST < MINIMUM_WAGE_COST);
    }
}
