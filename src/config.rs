// ⚙️ Generator Configuration
// Optional JSON file layered over built-in defaults

use anyhow::{Context as AnyhowContext, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a generation run.
///
/// Every key is optional in the file; missing keys keep their default and
/// unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root directory for person folders and the tabular file
    pub output_directory: PathBuf,

    /// Image copied into each person folder when `copy_template` is set
    pub template_image: PathBuf,

    /// Write `health_data_summary.csv` after the batch
    pub generate_csv: bool,

    /// Write `health_data.json` inside each person folder
    pub generate_json: bool,

    /// Create one folder per generated person
    pub create_folders: bool,

    pub copy_template: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_directory: PathBuf::from("./generated_health_data"),
            template_image: PathBuf::from("1.png"),
            generate_csv: true,
            generate_json: true,
            create_folders: true,
            copy_template: true,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration, falling back to defaults.
    ///
    /// A missing path yields defaults silently. A file that cannot be read
    /// or parsed yields defaults with a warning; it never fails the run.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded configuration file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load configuration file {}: {:#}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Strict loader used by `load`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config JSON")
    }

    /// Write the default configuration as a starting point for users
    pub fn write_sample<P: AsRef<Path>>(path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write sample config: {:?}", path.as_ref()))?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
