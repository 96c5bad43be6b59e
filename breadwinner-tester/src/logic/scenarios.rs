//! Scenario catalog: named bundles of simulation runs with pass criteria.

use anyhow::{Result, bail};
use breadwinner_game::SessionStorage;
use log::info;
use serde::Serialize;
use std::time::Instant;

use super::policy::Strategy;
use super::simulation::{RunRecord, SimulationConfig, run_simulation};
use super::storage::FileStorage;

const SMOKE_DURATION_SECS: f64 = 30.0;
const SMOKE_MIN_LIFETIME: f64 = 40.0;
const INVARIANTS_DURATION_SECS: f64 = 120.0;
const INVARIANTS_JITTER: f64 = 0.35;

/// Options shared by every scenario in one invocation.
#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    pub seeds: Vec<u64>,
    pub strategy: Strategy,
    pub duration_secs: f64,
    pub fps: f64,
    pub jitter: f64,
    pub clicks_per_second: f64,
    /// Where to persist each run's final session, if anywhere.
    pub save_storage: Option<FileStorage>,
}

/// Result of one scenario across all requested seeds.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub failures: Vec<String>,
    pub duration_ms: u128,
    pub records: Vec<RunRecord>,
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Short fixed-step greedy run; basic progress sanity"),
        ("progression", "Full-length run under the selected policy"),
        (
            "invariants",
            "Jittered run with injected clock faults; audits every frame",
        ),
    ]
}

/// Run one scenario by name.
///
/// # Errors
///
/// Fails on an unknown scenario name or when persisting a final session
/// fails.
pub fn run_scenario(name: &str, opts: &ScenarioOptions) -> Result<ScenarioResult> {
    let started = Instant::now();
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for &seed in &opts.seeds {
        let config = match name {
            "smoke" => SimulationConfig::new(Strategy::Greedy, seed)
                .with_duration(SMOKE_DURATION_SECS)
                .with_timing(opts.fps, 0.0)
                .with_clicks_per_second(opts.clicks_per_second),
            "progression" => SimulationConfig::new(opts.strategy, seed)
                .with_duration(opts.duration_secs)
                .with_timing(opts.fps, opts.jitter)
                .with_clicks_per_second(opts.clicks_per_second),
            "invariants" => SimulationConfig::new(Strategy::Greedy, seed)
                .with_duration(opts.duration_secs.min(INVARIANTS_DURATION_SECS))
                .with_timing(opts.fps, INVARIANTS_JITTER)
                .with_clicks_per_second(opts.clicks_per_second)
                .with_clock_faults(true),
            other => bail!("unknown scenario: {other}"),
        };

        let outcome = run_simulation(&config);
        judge_run(name, &outcome.record, &mut failures);

        if let Some(storage) = &opts.save_storage {
            let save_name = format!("{name}-{seed}");
            storage.save_session(&save_name, &outcome.session)?;
            info!("saved final session as {save_name}");
        }
        records.push(outcome.record);
    }

    Ok(ScenarioResult {
        scenario_name: name.to_string(),
        passed: failures.is_empty(),
        failures,
        duration_ms: started.elapsed().as_millis(),
        records,
    })
}

fn judge_run(name: &str, record: &RunRecord, failures: &mut Vec<String>) {
    for violation in &record.invariant_violations {
        failures.push(format!("seed {}: {violation}", record.seed));
    }

    match name {
        "smoke" => {
            if record.lifetime_total < SMOKE_MIN_LIFETIME {
                failures.push(format!(
                    "seed {}: lifetime {} below smoke threshold {SMOKE_MIN_LIFETIME}",
                    record.seed, record.lifetime_total
                ));
            }
        }
        "progression" => {
            let bought = record.total_purchases();
            if record.policy == "clicker" {
                if bought != 0 {
                    failures.push(format!(
                        "seed {}: clicker policy somehow bought {bought} upgrades",
                        record.seed
                    ));
                }
            } else if bought == 0 {
                failures.push(format!(
                    "seed {}: no purchases over {:.0}s of play",
                    record.seed, record.simulated_secs
                ));
            }
        }
        // Invariant auditing alone decides the fuzz scenario.
        _ => {}
    }
}
