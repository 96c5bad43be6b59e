mod logic;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use logic::{
    FileStorage, ScenarioOptions, Strategy, generate_console_report, generate_json_report,
    list_scenarios, run_scenario,
};

#[derive(Debug, Parser)]
#[command(name = "breadwinner-tester", version = "0.1.0")]
#[command(about = "Automated QA for the Breadwinner economy - drives the clock and input roles headlessly")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Purchase policy for progression runs
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    policy: Strategy,

    /// Simulated run length in seconds
    #[arg(long, default_value_t = 300.0)]
    duration: f64,

    /// Nominal clock rate in frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Fractional frame-interval jitter (0 = fixed step)
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,

    /// Automated clicks per simulated second
    #[arg(long, default_value_t = 2.0)]
    cps: f64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory to persist each run's final session as JSON
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        return print_scenarios(&args);
    }

    announce_banner();
    let start = Instant::now();

    let opts = build_options(&args)?;
    let mut results = Vec::new();
    for name in expand_scenarios(&args.scenarios) {
        results.push(run_scenario(&name, &opts)?);
    }

    emit_reports(&args, &results, start.elapsed())?;

    if results.iter().any(|result| !result.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🍞 Breadwinner Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn build_options(args: &Args) -> Result<ScenarioOptions> {
    let seeds = parse_seeds(&args.seeds)?;
    let save_storage = args
        .save_dir
        .as_deref()
        .map(FileStorage::new)
        .transpose()
        .context("create save directory")?;
    Ok(ScenarioOptions {
        seeds,
        strategy: args.policy,
        duration_secs: args.duration,
        fps: args.fps,
        jitter: args.jitter,
        clicks_per_second: args.cps,
        save_storage,
    })
}

fn print_scenarios(args: &Args) -> Result<()> {
    let mut lines = vec!["Available scenarios:".to_string()];
    for (key, description) in list_scenarios() {
        lines.push(format!("  {key:12} - {description}"));
    }
    let text = lines.join("\n");
    match &args.output {
        Some(path) => fs::write(path, text + "\n").context("write scenario list")?,
        None => println!("{text}"),
    }
    Ok(())
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_seeds(input: &str) -> Result<Vec<u64>> {
    split_csv(input)
        .into_iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed: {token}"))
        })
        .collect()
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.contains(&"all".to_string()) {
        scenarios = list_scenarios()
            .into_iter()
            .map(|(key, _)| key.to_string())
            .collect();
    }
    scenarios
}

fn emit_reports(
    args: &Args,
    results: &[logic::ScenarioResult],
    total_duration: std::time::Duration,
) -> Result<()> {
    match args.report.as_str() {
        "json" => {
            let json = generate_json_report(results)?;
            match &args.output {
                Some(path) => fs::write(path, json).context("write json report")?,
                None => println!("{json}"),
            }
        }
        _ => generate_console_report(results, total_duration),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_splitting_trims_and_drops_empties() {
        assert_eq!(split_csv("smoke, invariants ,"), vec!["smoke", "invariants"]);
    }

    #[test]
    fn seeds_parse_or_fail_loudly() {
        assert_eq!(parse_seeds("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_seeds("1,bread").is_err());
    }

    #[test]
    fn all_expands_to_the_catalog() {
        let expanded = expand_scenarios("all");
        assert_eq!(expanded.len(), list_scenarios().len());
    }
}
