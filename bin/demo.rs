// Health Data Synth - Demo
// Generates a small batch, analyses it, and saves the full report

use anyhow::Result;
use env_logger::Env;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use health_data_synth::{
    BatchOrchestrator, GeneratorConfig, HealthDataAnalyzer, RecordGenerator, ValuePools,
};

const DEMO_OUTPUT_DIR: &str = "./demo_output";
const DEMO_REPORT_FILE: &str = "demo_analysis_report.txt";
const DEMO_RECORD_COUNT: usize = 20;
const SUMMARY_LINES: usize = 10;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if env::args().any(|a| a == "--sample") {
        show_sample()
    } else {
        run_demo()
    }
}

fn run_demo() -> Result<()> {
    println!("🏥 Health Data Generator Demo");
    println!("{}", "=".repeat(50));

    let output_dir = Path::new(DEMO_OUTPUT_DIR);
    let mut orchestrator = BatchOrchestrator::from_config(GeneratorConfig::default());

    println!("🔄 Generating {} demo records...", DEMO_RECORD_COUNT);
    let outcome = orchestrator.generate_batch(DEMO_RECORD_COUNT, Some(output_dir))?;
    println!("✅ {}", outcome.summary());

    println!("\n📊 Analysing generated data...");
    let analyzer = HealthDataAnalyzer::from_directory(output_dir)?;
    let report = analyzer.generate_report();

    // Demographics section only, up to the health metrics header
    println!("📋 Summary:");
    report
        .lines()
        .skip_while(|line| !line.contains("Demographics"))
        .take_while(|line| !line.contains("Health Metrics"))
        .filter(|line| !line.trim().is_empty())
        .take(SUMMARY_LINES)
        .for_each(|line| println!("{}", line));

    let report_path = output_dir.join(DEMO_REPORT_FILE);
    fs::write(&report_path, &report)?;
    println!("📄 Full report saved to {}", report_path.display());

    println!("\n🎉 Demo complete! See {} for the generated files", DEMO_OUTPUT_DIR);
    Ok(())
}

fn show_sample() -> Result<()> {
    let mut generator = RecordGenerator::new(Arc::new(ValuePools::new()));
    let record = generator.generate_record()?;
    let (p, h, m) = (&record.person, &record.health, &record.history);

    let or_none = |items: &[String]| {
        if items.is_empty() {
            "None".to_string()
        } else {
            items.join(", ")
        }
    };

    println!("📋 Sample person");
    println!("{}", "-".repeat(30));
    println!("Name: {}", p.name);
    println!("Age: {}", p.age);
    println!("Gender: {}", p.gender.name());
    println!("Height: {} cm", p.height);
    println!("Weight: {} kg", p.weight);
    println!("BMI: {}", h.bmi);
    println!(
        "Blood pressure: {}/{} mmHg",
        h.blood_pressure_systolic, h.blood_pressure_diastolic
    );
    println!("Heart rate: {} bpm", h.heart_rate);
    println!("Blood type: {}", p.blood_type.name());
    println!("Allergies: {}", or_none(&m.allergies));
    println!("Chronic diseases: {}", or_none(&m.chronic_diseases));

    Ok(())
}
