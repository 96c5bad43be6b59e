//! Report rendering: colored console summary and machine-readable JSON.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::time::Duration;

use super::scenarios::ScenarioResult;

/// Top-level JSON report envelope.
#[derive(Debug, Serialize)]
pub struct TestReport<'a> {
    pub generated_at: String,
    pub total_scenarios: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: &'a [ScenarioResult],
}

impl<'a> TestReport<'a> {
    #[must_use]
    pub fn new(results: &'a [ScenarioResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_scenarios: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }
}

pub fn generate_console_report(results: &[ScenarioResult], total_duration: Duration) {
    println!();
    println!("{}", "📊 Economy Test Results Summary".bright_cyan().bold());
    println!("{}", "===============================".cyan());

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    println!("Total scenarios: {total}");
    println!("Passed: {}", passed.to_string().green());
    println!("Failed: {}", (total - passed).to_string().red());
    println!("Total time: {total_duration:?}");
    println!();

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        println!("{} {}", status, result.scenario_name.bold());
        println!(
            "   Runs: {} ({} ms)",
            result.records.len(),
            result.duration_ms
        );

        for record in &result.records {
            println!(
                "   seed {:>12}  {:>8} loaves banked, {:>10.1} lifetime, {:.2}/s auto, {} purchases",
                record.seed,
                record.final_loaves,
                record.lifetime_total,
                record.per_time_yield,
                record.total_purchases()
            );
        }

        if !result.failures.is_empty() {
            println!("   Failures:");
            for failure in &result.failures {
                println!("     • {}", failure.red());
            }
        }
        println!();
    }
}

/// Render the JSON report.
///
/// # Errors
///
/// Fails when serialization fails.
pub fn generate_json_report(results: &[ScenarioResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&TestReport::new(results))?)
}
