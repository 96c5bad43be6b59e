//! Automated purchase strategies for headless runs.

use breadwinner_game::EconomySnapshot;
use clap::ValueEnum;

/// Policy interface for automated shopping decisions.
pub trait PurchasePolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the next upgrade to buy, given the current display snapshot.
    /// `None` means hold funds this frame.
    fn next_purchase(&mut self, snapshot: &EconomySnapshot) -> Option<String>;
}

/// Built-in strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// Buy the cheapest affordable upgrade every chance
    Greedy,
    /// Save for the most expensive tier still on the board
    Saver,
    /// Never buy anything; clicks only
    Clicker,
}

impl Strategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Greedy => "Greedy",
            Strategy::Saver => "Saver",
            Strategy::Clicker => "Clicker",
        }
    }

    #[must_use]
    pub fn create_policy(self) -> Box<dyn PurchasePolicy + Send> {
        match self {
            Strategy::Greedy => Box::new(GreedyPolicy),
            Strategy::Saver => Box::new(SaverPolicy),
            Strategy::Clicker => Box::new(ClickerPolicy),
        }
    }
}

struct GreedyPolicy;

impl PurchasePolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn next_purchase(&mut self, snapshot: &EconomySnapshot) -> Option<String> {
        snapshot
            .upgrades
            .iter()
            .filter(|view| view.affordable)
            .min_by_key(|view| view.cost)
            .map(|view| view.id.clone())
    }
}

struct SaverPolicy;

impl PurchasePolicy for SaverPolicy {
    fn name(&self) -> &'static str {
        "saver"
    }

    fn next_purchase(&mut self, snapshot: &EconomySnapshot) -> Option<String> {
        // Commit to the priciest tier still purchasable and wait it out.
        let target = snapshot
            .upgrades
            .iter()
            .filter(|view| !view.sold_out)
            .max_by_key(|view| view.cost)?;
        target.affordable.then(|| target.id.clone())
    }
}

struct ClickerPolicy;

impl PurchasePolicy for ClickerPolicy {
    fn name(&self) -> &'static str {
        "clicker"
    }

    fn next_purchase(&mut self, _snapshot: &EconomySnapshot) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breadwinner_game::GameSession;

    fn snapshot_with_balance(balance: f64) -> EconomySnapshot {
        let mut session = GameSession::new();
        while session.state().balance < balance {
            session.click();
        }
        session.snapshot()
    }

    #[test]
    fn greedy_picks_the_cheapest_affordable() {
        let mut policy = GreedyPolicy;
        assert_eq!(policy.next_purchase(&snapshot_with_balance(0.0)), None);
        assert_eq!(
            policy.next_purchase(&snapshot_with_balance(60.0)).as_deref(),
            Some(breadwinner_game::AUTO_BAKER_ID)
        );
    }

    #[test]
    fn saver_waits_for_the_top_tier() {
        let mut policy = SaverPolicy;
        assert_eq!(policy.next_purchase(&snapshot_with_balance(499.0)), None);
        assert_eq!(
            policy.next_purchase(&snapshot_with_balance(500.0)).as_deref(),
            Some(breadwinner_game::MINIMUM_WAGE_ID)
        );
    }

    #[test]
    fn clicker_never_buys() {
        let mut policy = ClickerPolicy;
        assert_eq!(policy.next_purchase(&snapshot_with_balance(10_000.0)), None);
    }
}
