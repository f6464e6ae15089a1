// 📂 Data Loader - tabular or per-person files back into flat records
// Prefers the shared CSV; falls back to one structured file per folder.

use crate::batch::{CSV_FILE_NAME, RECORD_FILE_NAME};
use crate::error::HealthDataError;
use crate::schema::{FieldGroup, FieldValue, FlatRecord};
use anyhow::{anyhow, Context, Result};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// LOAD OUTCOME
// ============================================================================

/// Where the records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Csv,
    RecordFiles,
}

impl LoadSource {
    pub fn name(&self) -> &str {
        match self {
            LoadSource::Csv => "CSV",
            LoadSource::RecordFiles => "JSON files",
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    /// Successfully parsed records only
    pub records: Vec<FlatRecord>,

    /// One `FileLoad` error per skipped file or row
    pub failures: Vec<HealthDataError>,

    pub source: LoadSource,
}

// ============================================================================
// DATA LOADER
// ============================================================================

pub struct DataLoader {
    directory: PathBuf,
}

impl DataLoader {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        DataLoader {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Load every record under the directory.
    ///
    /// A directory with neither a CSV nor any record files (or one that
    /// does not exist) yields an empty outcome, not an error.
    pub fn load(&self) -> Result<LoadOutcome> {
        let csv_path = self.directory.join(CSV_FILE_NAME);

        let outcome = if csv_path.exists() {
            load_csv(&csv_path)?
        } else {
            load_record_files(&self.directory)?
        };

        info!(
            "Loaded {} records from {}",
            outcome.records.len(),
            outcome.source.name()
        );

        Ok(outcome)
    }
}

/// Shorthand for `DataLoader::new(directory).load()`
pub fn load<P: AsRef<Path>>(directory: P) -> Result<LoadOutcome> {
    DataLoader::new(directory).load()
}

// ============================================================================
// TABULAR PATH
// ============================================================================

/// Parse the shared CSV, coercing numeric columns.
/// A row that cannot be parsed or coerced is logged and skipped.
pub fn load_csv(csv_path: &Path) -> Result<LoadOutcome> {
    let content = fs::read_to_string(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    let mut failures = Vec::new();

    for (i, row) in reader.records().enumerate() {
        // header is line 1
        let line = i + 2;

        let parsed = row
            .map_err(|e| e.to_string())
            .and_then(|row| {
                let mut record = FlatRecord::new();
                for (field, raw) in headers.iter().zip(row.iter()) {
                    record.insert(field.as_str(), FieldValue::from_cell(field, raw)?);
                }
                Ok(record)
            });

        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => {
                error!("Skipping row {} of {}: {}", line, csv_path.display(), reason);
                failures.push(HealthDataError::FileLoad {
                    path: csv_path.to_path_buf(),
                    reason: format!("row {}: {}", line, reason),
                });
            }
        }
    }

    Ok(LoadOutcome {
        records,
        failures,
        source: LoadSource::Csv,
    })
}

// ============================================================================
// STRUCTURED-FILE PATH
// ============================================================================

/// `<dir>/*/health_data.json`, sorted by path
pub fn discover_record_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {:?}", directory))?
    {
        let path = entry?.path();
        let candidate = path.join(RECORD_FILE_NAME);
        if path.is_dir() && candidate.is_file() {
            files.push(candidate);
        }
    }

    files.sort();
    Ok(files)
}

pub fn load_record_files(directory: &Path) -> Result<LoadOutcome> {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for path in discover_record_files(directory)? {
        match load_record_file(&path) {
            Ok(record) => records.push(record),
            Err(e) => {
                error!("Failed to load {}: {:#}", path.display(), e);
                failures.push(HealthDataError::FileLoad {
                    path,
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    Ok(LoadOutcome {
        records,
        failures,
        source: LoadSource::RecordFiles,
    })
}

/// Merge the three named groups of one structured file into a flat record
pub fn load_record_file(path: &Path) -> Result<FlatRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {:?}", path))?;
    let document: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse record JSON")?;

    let mut record = FlatRecord::new();
    for group in FieldGroup::ALL {
        let fields = document
            .get(group.key())
            .and_then(|g| g.as_object())
            .ok_or_else(|| anyhow!("missing group '{}'", group.key()))?;

        for (name, value) in fields {
            if let Some(value) = FieldValue::from_json(value) {
                record.insert(name.as_str(), value);
            }
        }
    }

    Ok(record)
}

// ============================================================================
// TESTS
// ============================================================================
