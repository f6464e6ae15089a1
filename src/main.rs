use anyhow::{anyhow, bail, Context, Result};
use env_logger::Env;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use health_data_synth::{
    BatchOrchestrator, GeneratorConfig, HealthDataAnalyzer, RecordGenerator, ValuePools,
};

const DEFAULT_CONFIG_FILE: &str = "config.json";

const USAGE: &str = "\
Usage:
  health-data generate <count> [--output DIR] [--config FILE] [--seed N] [--verbose]
  health-data analyze <dir> [--output FILE] [--print] [--verbose]
  health-data create-config [FILE]";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("generate") => run_generate(&args[1..]),
        Some("analyze") => run_analyze(&args[1..]),
        Some("create-config") => run_create_config(&args[1..]),
        _ => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

/// Value following `flag`, if the flag is present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow!("{} needs a value", flag)),
        None => Ok(None),
    }
}

fn run_generate(args: &[String]) -> Result<()> {
    let count: usize = args
        .first()
        .ok_or_else(|| anyhow!("missing record count\n{}", USAGE))?
        .parse()
        .context("record count must be a positive integer")?;

    let config = GeneratorConfig::load(flag_value(args, "--config")?.map(Path::new));
    let output = flag_value(args, "--output")?.map(PathBuf::from);

    let pools = Arc::new(ValuePools::new());
    let generator = match flag_value(args, "--seed")? {
        Some(seed) => {
            let seed: u64 = seed.parse().context("--seed must be an unsigned integer")?;
            RecordGenerator::with_seed(pools, seed)
        }
        None => RecordGenerator::new(pools),
    };

    println!("🧬 Generating {} health records", count);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut orchestrator = BatchOrchestrator::new(config, generator);
    let outcome = orchestrator.generate_batch(count, output.as_deref())?;

    println!("✓ {}", outcome.summary());
    if let Some(csv) = &outcome.csv_path {
        println!("✓ Summary table: {}", csv.display());
    }
    for failure in &outcome.failures {
        println!("⚠️  {}", failure);
    }

    Ok(())
}

fn run_analyze(args: &[String]) -> Result<()> {
    let dir = match args.first() {
        Some(d) if !d.starts_with("--") => d,
        _ => bail!("missing data directory\n{}", USAGE),
    };
    let output = flag_value(args, "--output")?.map(PathBuf::from);
    let print = args.iter().any(|a| a == "--print");

    let analyzer = HealthDataAnalyzer::from_directory(dir)?;
    let report = analyzer.save_report(output.as_deref())?;

    if print {
        println!("{}", report);
    }

    Ok(())
}

fn run_create_config(args: &[String]) -> Result<()> {
    let path = args
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_FILE);

    GeneratorConfig::write_sample(path)?;
    println!("✓ Sample configuration written to {}", path);

    Ok(())
}
