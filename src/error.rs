// ⚠️ Error Taxonomy
// Recoverable failures are carried as data by the batch and load loops;
// only an unusable output directory or a zero-sized batch stops a run.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HealthDataError {
    /// A value pool needed for sampling has no entries
    #[error("configuration error: value pool '{pool}' is empty")]
    EmptyPool { pool: String },

    /// Configuration source could not be used (defaults are substituted by callers)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("record count must be positive, got {0}")]
    InvalidCount(usize),

    /// The output directory could not be created
    #[error("cannot create output directory {path:?}: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One record failed mid-generation; the batch continues
    #[error("record {index} failed: {reason}")]
    RecordGeneration { index: usize, reason: String },

    /// One persisted record file could not be read or parsed; the load continues
    #[error("failed to load {path:?}: {reason}")]
    FileLoad { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, HealthDataError>;
