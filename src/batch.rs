// 📦 Batch Orchestrator - N records, per-person files, shared CSV
// A failed record is logged and skipped; only an unusable output
// directory aborts the run.

use crate::config::GeneratorConfig;
use crate::error::HealthDataError;
use crate::generator::RecordGenerator;
use crate::pools::ValuePools;
use crate::records::AggregateRecord;
use crate::schema;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared tabular file, directly under the output directory
pub const CSV_FILE_NAME: &str = "health_data_summary.csv";

/// Structured per-record file, inside each person folder
pub const RECORD_FILE_NAME: &str = "health_data.json";

/// Spreadsheet tools need the signature to detect UTF-8
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const PROGRESS_INTERVAL: usize = 10;

// ============================================================================
// BATCH OUTCOME
// ============================================================================

#[derive(Debug)]
pub struct BatchOutcome {
    /// Successfully generated records, in generation order
    pub records: Vec<AggregateRecord>,

    /// One `RecordGeneration` error per skipped record
    pub failures: Vec<HealthDataError>,

    pub output_dir: PathBuf,

    /// Path of the tabular file, when one was written
    pub csv_path: Option<PathBuf>,
}

impl BatchOutcome {
    pub fn summary(&self) -> String {
        format!(
            "{} records generated, {} skipped, output: {}",
            self.records.len(),
            self.failures.len(),
            self.output_dir.display()
        )
    }
}

// ============================================================================
// BATCH ORCHESTRATOR
// ============================================================================

pub struct BatchOrchestrator {
    config: GeneratorConfig,
    generator: RecordGenerator,
}

impl BatchOrchestrator {
    pub fn new(config: GeneratorConfig, generator: RecordGenerator) -> Self {
        BatchOrchestrator { config, generator }
    }

    /// Orchestrator with built-in pools and an entropy-seeded generator
    pub fn from_config(config: GeneratorConfig) -> Self {
        let generator = RecordGenerator::new(Arc::new(ValuePools::new()));
        Self::new(config, generator)
    }

    /// Generate `count` records.
    ///
    /// `output_directory` overrides the configured directory for this run.
    pub fn generate_batch(
        &mut self,
        count: usize,
        output_directory: Option<&Path>,
    ) -> Result<BatchOutcome> {
        if count == 0 {
            return Err(HealthDataError::InvalidCount(count).into());
        }

        let output_dir = output_directory
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.output_directory.clone());

        fs::create_dir_all(&output_dir).map_err(|source| HealthDataError::OutputUnavailable {
            path: output_dir.clone(),
            source,
        })?;

        info!("Generating {} health records...", count);

        let mut records = Vec::with_capacity(count);
        let mut failures = Vec::new();

        for i in 0..count {
            let index = i + 1;

            match self.generate_one(&output_dir) {
                Ok(record) => {
                    records.push(record);

                    if index % PROGRESS_INTERVAL == 0 {
                        info!("Generated {}/{} records", index, count);
                    }
                }
                Err(e) => {
                    error!("Failed to generate record {}: {:#}", index, e);
                    failures.push(HealthDataError::RecordGeneration {
                        index,
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        let csv_path = if self.config.generate_csv && !records.is_empty() {
            Some(write_csv(&records, &output_dir)?)
        } else {
            None
        };

        let shown_dir = fs::canonicalize(&output_dir).unwrap_or_else(|_| output_dir.clone());
        info!("Generation complete: {} records", records.len());
        info!("Output directory: {}", shown_dir.display());

        Ok(BatchOutcome {
            records,
            failures,
            output_dir,
            csv_path,
        })
    }

    fn generate_one(&mut self, output_dir: &Path) -> Result<AggregateRecord> {
        let record = self.generator.generate_record()?;

        if self.config.create_folders {
            let person_dir = self.create_person_folder(&record, output_dir)?;
            self.save_person_data(&record, &person_dir)?;
        }

        Ok(record)
    }

    /// Folder named after the person; colliding names share a folder and
    /// the last write wins.
    fn create_person_folder(&self, record: &AggregateRecord, output_dir: &Path) -> Result<PathBuf> {
        let person_dir = output_dir.join(&record.person.name);
        fs::create_dir_all(&person_dir)
            .with_context(|| format!("Failed to create person folder: {:?}", person_dir))?;

        if self.config.copy_template {
            let template = &self.config.template_image;
            if template.exists() {
                if let Some(file_name) = template.file_name() {
                    fs::copy(template, person_dir.join(file_name)).with_context(|| {
                        format!("Failed to copy template {:?} into {:?}", template, person_dir)
                    })?;
                    debug!("Copied template image to {}", person_dir.display());
                }
            }
        }

        Ok(person_dir)
    }

    fn save_person_data(&self, record: &AggregateRecord, person_dir: &Path) -> Result<()> {
        if !self.config.generate_json {
            return Ok(());
        }

        let json_path = person_dir.join(RECORD_FILE_NAME);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&json_path, json)
            .with_context(|| format!("Failed to write record file: {:?}", json_path))?;

        Ok(())
    }
}

// ============================================================================
// TABULAR EXPORT
// ============================================================================

/// Write all records as rows of the shared CSV (UTF-8 with BOM)
pub fn write_csv(records: &[AggregateRecord], output_dir: &Path) -> Result<PathBuf> {
    let csv_path = output_dir.join(CSV_FILE_NAME);

    let mut file = File::create(&csv_path)
        .with_context(|| format!("Failed to create CSV file: {:?}", csv_path))?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(schema::header())?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    info!("CSV file saved: {}", csv_path.display());

    Ok(csv_path)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> GeneratorConfig {
        GeneratorConfig {
            output_directory: dir.to_path_buf(),
            copy_template: false,
            ..GeneratorConfig::default()
        }
    }

    fn seeded_orchestrator(config: GeneratorConfig, seed: u64) -> BatchOrchestrator {
        BatchOrchestrator::new(
            config,
            RecordGenerator::with_seed(Arc::new(ValuePools::new()), seed),
        )
    }

    #[test]
    fn test_generate_five_records() {
        let tmp = tempfile::tempdir().unwrap();
        let mut orchestrator = seeded_orchestrator(test_config(tmp.path()), 2024);

        let outcome = orchestrator.generate_batch(5, None).unwrap();

        assert_eq!(outcome.records.len(), 5);
        assert!(outcome.failures.is_empty());

        // Tabular file: header + 5 rows
        let csv_path = tmp.path().join(CSV_FILE_NAME);
        assert_eq!(outcome.csv_path.as_deref(), Some(csv_path.as_path()));
        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.records().count(), 5);

        // One folder per person, each with all three groups
        let folders: Vec<PathBuf> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.is_dir())
            .collect();
        assert_eq!(folders.len(), 5);

        for folder in folders {
            let content = fs::read_to_string(folder.join(RECORD_FILE_NAME)).unwrap();
            let json: serde_json::Value = serde_json::from_str(&content).unwrap();
            assert!(json.get("personal_info").is_some());
            assert!(json.get("health_metrics").is_some());
            assert!(json.get("medical_history").is_some());
        }
    }

    #[test]
    fn test_csv_starts_with_bom_and_header() {
        let tmp = tempfile::tempdir().unwrap();
        let mut orchestrator = seeded_orchestrator(test_config(tmp.path()), 1);

        orchestrator.generate_batch(3, None).unwrap();

        let bytes = fs::read(tmp.path().join(CSV_FILE_NAME)).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, schema::header().join(","));
    }

    #[test]
    fn test_output_directory_override() {
        let tmp = tempfile::tempdir().unwrap();
        let configured = tmp.path().join("configured");
        let override_dir = tmp.path().join("override");
        let mut orchestrator = seeded_orchestrator(test_config(&configured), 3);

        let outcome = orchestrator.generate_batch(2, Some(&override_dir)).unwrap();

        assert_eq!(outcome.output_dir, override_dir);
        assert!(override_dir.join(CSV_FILE_NAME).exists());
        assert!(!configured.exists());
    }

    #[test]
    fn test_no_folders_when_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            create_folders: false,
            ..test_config(tmp.path())
        };
        let mut orchestrator = seeded_orchestrator(config, 4);

        let outcome = orchestrator.generate_batch(12, None).unwrap();

        assert_eq!(outcome.records.len(), 12);
        let dirs = fs::read_dir(tmp.path())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().is_dir())
            .count();
        assert_eq!(dirs, 0);
        assert!(tmp.path().join(CSV_FILE_NAME).exists());
    }

    #[test]
    fn test_folders_without_json() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            generate_json: false,
            generate_csv: false,
            ..test_config(tmp.path())
        };
        let mut orchestrator = seeded_orchestrator(config, 5);

        let outcome = orchestrator.generate_batch(3, None).unwrap();

        assert!(outcome.csv_path.is_none());
        assert!(!tmp.path().join(CSV_FILE_NAME).exists());
        for record in &outcome.records {
            let folder = tmp.path().join(&record.person.name);
            assert!(folder.is_dir());
            assert!(!folder.join(RECORD_FILE_NAME).exists());
        }
    }

    #[test]
    fn test_template_copied_into_each_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("template.png");
        fs::write(&template, b"not really a png").unwrap();

        let out = tmp.path().join("out");
        let config = GeneratorConfig {
            copy_template: true,
            template_image: template.clone(),
            ..test_config(&out)
        };
        let mut orchestrator = seeded_orchestrator(config, 6);

        let outcome = orchestrator.generate_batch(2, None).unwrap();

        for record in &outcome.records {
            let copied = out.join(&record.person.name).join("template.png");
            assert_eq!(fs::read(copied).unwrap(), b"not really a png");
        }
    }

    #[test]
    fn test_zero_count_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut orchestrator = seeded_orchestrator(test_config(tmp.path()), 7);

        let err = orchestrator.generate_batch(0, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HealthDataError>(),
            Some(HealthDataError::InvalidCount(0))
        ));
    }

    #[test]
    fn test_unusable_output_directory_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let mut orchestrator = seeded_orchestrator(test_config(&blocker.join("out")), 8);
        let err = orchestrator.generate_batch(1, None).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<HealthDataError>(),
            Some(HealthDataError::OutputUnavailable { .. })
        ));
    }

    #[test]
    fn test_colliding_names_share_a_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let mut pools = ValuePools::new();
        pools.surnames = vec!["王".to_string()];
        pools.given_names = vec!["明".to_string()];
        let mut orchestrator = BatchOrchestrator::new(
            test_config(tmp.path()),
            RecordGenerator::with_seed(Arc::new(pools), 12),
        );

        let outcome = orchestrator.generate_batch(6, None).unwrap();
        assert_eq!(outcome.records.len(), 6);

        // every record is still tabulated
        let mut reader = csv::Reader::from_path(tmp.path().join(CSV_FILE_NAME)).unwrap();
        assert_eq!(reader.records().count(), 6);

        // only "王明" and "王明明" are possible, so folders are shared
        let dirs = fs::read_dir(tmp.path())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().is_dir())
            .count();
        assert!((1..=2).contains(&dirs));

        let loaded = crate::loader::load_record_files(tmp.path()).unwrap();
        assert_eq!(loaded.records.len(), dirs);
        assert!(loaded.failures.is_empty());
    }

    #[test]
    fn test_partial_failure_keeps_generation_order() {
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("template.png");
        fs::write(&template, b"png").unwrap();
        let out = tmp.path().join("out");

        // same seed, same draws: names are known before the batch runs
        let pools = Arc::new(ValuePools::new());
        let mut twin = RecordGenerator::with_seed(pools.clone(), 21);
        let names: Vec<String> = (0..5)
            .map(|_| twin.generate_record().unwrap().person.name)
            .collect();
        assert_eq!(names.iter().filter(|n| **n == names[2]).count(), 1);

        // a directory where the third template copy should go makes it fail
        fs::create_dir_all(out.join(&names[2]).join("template.png")).unwrap();

        let config = GeneratorConfig {
            copy_template: true,
            template_image: template,
            ..test_config(&out)
        };
        let mut orchestrator =
            BatchOrchestrator::new(config, RecordGenerator::with_seed(pools, 21));

        let outcome = orchestrator.generate_batch(5, None).unwrap();

        assert_eq!(outcome.failures.len(), 1);
        assert!(matches!(
            outcome.failures[0],
            HealthDataError::RecordGeneration { index: 3, .. }
        ));

        let generated: Vec<&str> = outcome.records.iter().map(|r| r.person.name.as_str()).collect();
        let expected: Vec<&str> = names
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, n)| n.as_str())
            .collect();
        assert_eq!(generated, expected);

        let mut reader = csv::Reader::from_path(out.join(CSV_FILE_NAME)).unwrap();
        assert_eq!(reader.records().count(), 4);
    }

    #[test]
    fn test_failed_records_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let mut pools = ValuePools::new();
        pools.surnames.clear();
        let mut orchestrator = BatchOrchestrator::new(
            test_config(tmp.path()),
            RecordGenerator::with_seed(Arc::new(pools), 9),
        );

        let outcome = orchestrator.generate_batch(4, None).unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.failures.len(), 4);
        assert!(matches!(
            outcome.failures[0],
            HealthDataError::RecordGeneration { index: 1, .. }
        ));
        assert!(outcome.failures[3].to_string().contains("surnames"));
        // nothing to tabulate
        assert!(!tmp.path().join(CSV_FILE_NAME).exists());
    }
}
