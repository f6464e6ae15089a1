// 🔬 Health Data Analyzer - load, summarise, report
// Loading happens once at construction; reports are rendered on demand.

use crate::loader::{DataLoader, LoadOutcome};
use crate::report;
use crate::schema::FlatRecord;
use crate::statistics::{AnalysisSummary, StatisticsEngine};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Report file written next to the data when no path is given
pub const DEFAULT_REPORT_FILE: &str = "analysis_report.txt";

pub struct HealthDataAnalyzer {
    data_dir: PathBuf,
    records: Vec<FlatRecord>,
    engine: StatisticsEngine,
}

impl HealthDataAnalyzer {
    /// Load every record under `data_dir`. Skipped files or rows are
    /// logged by the loader and not treated as errors here.
    pub fn from_directory<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let loader = DataLoader::new(data_dir.as_ref());
        let LoadOutcome {
            records, failures, ..
        } = loader.load()?;

        if !failures.is_empty() {
            info!("{} entries skipped while loading", failures.len());
        }

        Ok(Self::from_records(loader.directory(), records))
    }

    pub fn from_records<P: AsRef<Path>>(data_dir: P, records: Vec<FlatRecord>) -> Self {
        HealthDataAnalyzer {
            data_dir: data_dir.as_ref().to_path_buf(),
            records,
            engine: StatisticsEngine::new(),
        }
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn summary(&self) -> Option<AnalysisSummary> {
        self.engine.analyze(&self.records)
    }

    pub fn generate_report(&self) -> String {
        report::render(self.summary().as_ref())
    }

    /// Write the report to `output` (default `<data_dir>/analysis_report.txt`)
    /// and return its text.
    pub fn save_report(&self, output: Option<&Path>) -> Result<String> {
        let text = self.generate_report();
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_REPORT_FILE));

        fs::write(&path, &text)
            .with_context(|| format!("Failed to write report: {:?}", path))?;
        info!("Analysis report saved to {}", path.display());

        Ok(text)
    }
}

/// Summaries for an in-memory batch, without touching the filesystem
pub fn analyze_records(records: &[FlatRecord]) -> Option<AnalysisSummary> {
    StatisticsEngine::new().analyze(records)
}

// ============================================================================
// TESTS
// ============================================================================
