//! Headless simulation harness: drives a session the way a display loop and
//! a player would, and audits the core invariants after every frame.

use std::collections::BTreeMap;

use breadwinner_game::GameSession;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::driver::FrameClock;
use super::policy::Strategy;

/// Safety valve so a misbehaving policy cannot spin inside one frame.
const MAX_PURCHASES_PER_FRAME: usize = 32;
/// Keep reports readable when an invariant breaks on every frame.
const MAX_RECORDED_VIOLATIONS: usize = 16;
/// Roughly one injected clock fault per 97 frames.
const FAULT_DENOMINATOR: u32 = 97;

/// Configuration for one simulated playthrough.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: Strategy,
    /// Simulated wall-clock length of the run, in seconds.
    pub duration_secs: f64,
    pub fps: f64,
    /// Fractional interval jitter, 0 for a fixed step.
    pub jitter: f64,
    pub clicks_per_second: f64,
    /// Inject negative/NaN intervals the core must reject as no-ops.
    pub inject_clock_faults: bool,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(strategy: Strategy, seed: u64) -> Self {
        Self {
            seed,
            strategy,
            duration_secs: 300.0,
            fps: 60.0,
            jitter: 0.0,
            clicks_per_second: 2.0,
            inject_clock_faults: false,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, fps: f64, jitter: f64) -> Self {
        self.fps = fps;
        self.jitter = jitter;
        self
    }

    #[must_use]
    pub fn with_clicks_per_second(mut self, clicks_per_second: f64) -> Self {
        self.clicks_per_second = clicks_per_second;
        self
    }

    #[must_use]
    pub fn with_clock_faults(mut self, inject: bool) -> Self {
        self.inject_clock_faults = inject;
        self
    }
}

/// Everything measured about one playthrough.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub seed: u64,
    pub policy: &'static str,
    pub simulated_secs: f64,
    pub frames: u64,
    pub clicks: u64,
    pub final_loaves: u64,
    pub lifetime_total: f64,
    pub per_time_yield: f64,
    pub per_click_yield: f64,
    /// Purchases per upgrade id.
    pub purchases: BTreeMap<String, u32>,
    /// Simulated second of the first purchase of each upgrade.
    pub first_purchase_secs: BTreeMap<String, f64>,
    pub invariant_violations: Vec<String>,
}

impl RunRecord {
    #[must_use]
    pub fn total_purchases(&self) -> u32 {
        self.purchases.values().sum()
    }
}

/// A finished playthrough: the measurements plus the session itself, so
/// callers can persist or inspect the final state.
pub struct SimulationOutcome {
    pub record: RunRecord,
    pub session: GameSession,
}

/// Play one session to completion under the given configuration.
#[must_use]
pub fn run_simulation(config: &SimulationConfig) -> SimulationOutcome {
    info!(
        "simulation start: seed={} policy={} duration={}s",
        config.seed,
        config.strategy.label(),
        config.duration_secs
    );

    let mut session = GameSession::new();
    let mut clock = FrameClock::new(config.fps, config.jitter, config.seed);
    let mut fault_rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_mul(0x9E37_79B9));
    let mut policy = config.strategy.create_policy();

    let mut record = RunRecord {
        seed: config.seed,
        policy: policy.name(),
        simulated_secs: 0.0,
        frames: 0,
        clicks: 0,
        final_loaves: 0,
        lifetime_total: 0.0,
        per_time_yield: 0.0,
        per_click_yield: 0.0,
        purchases: BTreeMap::new(),
        first_purchase_secs: BTreeMap::new(),
        invariant_violations: Vec::new(),
    };

    let mut sim_time = 0.0_f64;
    let mut click_debt = 0.0_f64;
    let mut lifetime_watermark = 0.0_f64;

    while sim_time < config.duration_secs {
        let dt = clock.next_interval();

        if config.inject_clock_faults && fault_rng.gen_ratio(1, FAULT_DENOMINATOR) {
            // A rolled-back or broken clock; both must be rejected as no-ops.
            session.tick(-dt);
            session.tick(f64::NAN);
        }

        session.tick(dt);
        sim_time += dt;
        record.frames += 1;

        click_debt += config.clicks_per_second * dt;
        while click_debt >= 1.0 {
            session.click();
            record.clicks += 1;
            click_debt -= 1.0;
        }

        for _ in 0..MAX_PURCHASES_PER_FRAME {
            let snapshot = session.snapshot();
            let Some(id) = policy.next_purchase(&snapshot) else {
                break;
            };
            match session.purchase(&id) {
                Ok(receipt) => {
                    debug!(
                        "t={sim_time:.1}s bought {} for {} (owned {})",
                        receipt.id, receipt.cost, receipt.new_count
                    );
                    *record.purchases.entry(receipt.id.clone()).or_insert(0) += 1;
                    record.first_purchase_secs.entry(receipt.id).or_insert(sim_time);
                }
                Err(err) => {
                    note_violation(
                        &mut record,
                        format!("policy chose a rejected purchase: {err}"),
                    );
                    break;
                }
            }
        }

        audit_frame(&session, &mut record, &mut lifetime_watermark);
        // A real UI would consume these; keep the buffer from pinning memory.
        session.drain_events();
    }

    record.simulated_secs = sim_time;
    record.final_loaves = session.state().loaves();
    record.lifetime_total = session.state().lifetime_total;
    record.per_time_yield = session.state().per_time_yield;
    record.per_click_yield = session.state().per_click_yield;

    SimulationOutcome { record, session }
}

fn audit_frame(session: &GameSession, record: &mut RunRecord, lifetime_watermark: &mut f64) {
    let state = session.state();
    if state.balance < 0.0 {
        note_violation(record, format!("balance went negative: {}", state.balance));
    }
    if state.lifetime_total + 1e-9 < state.balance {
        note_violation(
            record,
            format!(
                "lifetime {} fell below balance {}",
                state.lifetime_total, state.balance
            ),
        );
    }
    if state.lifetime_total + 1e-9 < *lifetime_watermark {
        note_violation(record, "lifetime total decreased".to_string());
    }
    *lifetime_watermark = lifetime_watermark.max(state.lifetime_total);

    for upgrade in session.ledger().iter() {
        if !upgrade.repeatable && upgrade.count > 1 {
            note_violation(
                record,
                format!("one-time upgrade {} owned {} times", upgrade.id, upgrade.count),
            );
        }
    }
}

fn note_violation(record: &mut RunRecord, message: String) {
    if record.invariant_violations.len() < MAX_RECORDED_VIOLATIONS {
        record.invariant_violations.push(message);
    }
}
