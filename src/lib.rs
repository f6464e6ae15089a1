// Health Data Synth - Core Library
// Exposes all modules for use in the generator CLI, the demo, and tests

pub mod error;
pub mod config;
pub mod pools;
pub mod schema;      // Field layout shared by CSV, JSON and the analyzer
pub mod records;
pub mod generator;
pub mod batch;
pub mod loader;
pub mod statistics;
pub mod report;
pub mod analyzer;

// Re-export commonly used types
pub use error::HealthDataError;
pub use config::GeneratorConfig;
pub use pools::ValuePools;
pub use schema::{FieldGroup, FieldKind, FieldValue, FlatRecord};
pub use records::{
    AggregateRecord, BloodType, Gender, HealthMetrics, MedicalHistory, PersonRecord,
};
pub use generator::{calculate_bmi, RecordGenerator};
pub use batch::{BatchOrchestrator, BatchOutcome, CSV_FILE_NAME, RECORD_FILE_NAME};
pub use loader::{DataLoader, LoadOutcome, LoadSource};
pub use statistics::{
    AgeGroup, AnalysisSummary, BloodPressureCategory, BmiCategory, Demographics,
    FrequencyTable, HealthMetricsSummary, MedicalHistorySummary, Metric, StatisticsEngine,
    SummaryStats,
};
pub use report::{format_report, ReportFormatter, NO_DATA_REPORT};
pub use analyzer::{analyze_records, HealthDataAnalyzer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
