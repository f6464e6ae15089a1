// 📊 Statistics Engine - demographics, health metrics, medical history
// Pure functions over loaded records; input is never modified.

use crate::schema::FlatRecord;
use serde::{Deserialize, Serialize};

// ============================================================================
// DESCRIPTIVE STATISTICS
// ============================================================================

pub fn round_to(value: f64, places: usize) -> f64 {
    crate::generator::round_to(value, places)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation; 0 for fewer than two values
pub fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Share of `total` as a percentage; 0 when `total` is 0
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub stdev: f64,
}

impl SummaryStats {
    pub fn zero() -> Self {
        SummaryStats {
            mean: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
            stdev: 0.0,
        }
    }

    /// Summary rounded to `places` decimals; `None` for no values
    pub fn from_values(values: &[f64], places: usize) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(SummaryStats {
            mean: round_to(mean(values), places),
            median: round_to(median(values), places),
            min: round_to(min, places),
            max: round_to(max, places),
            stdev: round_to(sample_stdev(values), places),
        })
    }
}

// ============================================================================
// FREQUENCY TABLE
// ============================================================================

/// Counts keyed by value, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for item in items {
            table.add(item.as_ref());
        }
        table
    }

    pub fn add(&mut self, key: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key.to_string(), 1)),
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// `n` most frequent, descending; ties keep first-seen order
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

// ============================================================================
// BUCKETS
// ============================================================================

/// Fixed set of named buckets with a count each, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketCounts<C> {
    counts: Vec<(C, usize)>,
}

impl<C: Copy + PartialEq> BucketCounts<C> {
    pub fn new(buckets: &[C]) -> Self {
        BucketCounts {
            counts: buckets.iter().map(|b| (*b, 0)).collect(),
        }
    }

    pub fn increment(&mut self, bucket: C) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(b, _)| *b == bucket) {
            *count += 1;
        }
    }

    pub fn get(&self, bucket: C) -> usize {
        self.counts
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, usize)> + '_ {
        self.counts.iter().copied()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    From18To30,
    From31To45,
    From46To60,
    From61To75,
    Over75,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::From18To30,
        AgeGroup::From31To45,
        AgeGroup::From46To60,
        AgeGroup::From61To75,
        AgeGroup::Over75,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::From18To30 => "18-30",
            AgeGroup::From31To45 => "31-45",
            AgeGroup::From46To60 => "46-60",
            AgeGroup::From61To75 => "61-75",
            AgeGroup::Over75 => "76+",
        }
    }

    /// Inclusive boundaries; anything outside the first four ranges
    /// (including ages under 18) lands in the last bucket.
    pub fn classify(age: f64) -> AgeGroup {
        if (18.0..=30.0).contains(&age) {
            AgeGroup::From18To30
        } else if (31.0..=45.0).contains(&age) {
            AgeGroup::From31To45
        } else if (46.0..=60.0).contains(&age) {
            AgeGroup::From46To60
        } else if (61.0..=75.0).contains(&age) {
            AgeGroup::From61To75
        } else {
            AgeGroup::Over75
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight (<18.5)",
            BmiCategory::Normal => "Normal (18.5-24.9)",
            BmiCategory::Overweight => "Overweight (25-29.9)",
            BmiCategory::Obese => "Obese (>=30)",
        }
    }

    pub fn classify(bmi: f64) -> BmiCategory {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodPressureCategory {
    Normal,
    Elevated,
    Stage1,
    Stage2,
}

impl BloodPressureCategory {
    pub const ALL: [BloodPressureCategory; 4] = [
        BloodPressureCategory::Normal,
        BloodPressureCategory::Elevated,
        BloodPressureCategory::Stage1,
        BloodPressureCategory::Stage2,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal (<120/80)",
            BloodPressureCategory::Elevated => "Elevated (120-129/<80)",
            BloodPressureCategory::Stage1 => "Hypertension stage 1 (130-139/80-89)",
            BloodPressureCategory::Stage2 => "Hypertension stage 2 (>=140/90)",
        }
    }

    /// Checked in order; the first matching rule wins. Stage 2 is the
    /// fallback, so e.g. 135/95 is stage 1 because of the systolic range.
    pub fn classify(systolic: f64, diastolic: f64) -> BloodPressureCategory {
        if systolic < 120.0 && diastolic < 80.0 {
            BloodPressureCategory::Normal
        } else if (120.0..130.0).contains(&systolic) && diastolic < 80.0 {
            BloodPressureCategory::Elevated
        } else if (130.0..140.0).contains(&systolic) || (80.0..90.0).contains(&diastolic) {
            BloodPressureCategory::Stage1
        } else {
            BloodPressureCategory::Stage2
        }
    }
}

/// Health metrics summarised by the engine, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Bmi,
    Systolic,
    Diastolic,
    HeartRate,
    BodyTemperature,
    BloodSugar,
    Cholesterol,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Bmi,
        Metric::Systolic,
        Metric::Diastolic,
        Metric::HeartRate,
        Metric::BodyTemperature,
        Metric::BloodSugar,
        Metric::Cholesterol,
    ];

    /// Field name in the flattened record
    pub fn field(&self) -> &'static str {
        match self {
            Metric::Bmi => "bmi",
            Metric::Systolic => "blood_pressure_systolic",
            Metric::Diastolic => "blood_pressure_diastolic",
            Metric::HeartRate => "heart_rate",
            Metric::BodyTemperature => "body_temperature",
            Metric::BloodSugar => "blood_sugar",
            Metric::Cholesterol => "cholesterol",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Bmi => "BMI",
            Metric::Systolic => "Systolic pressure",
            Metric::Diastolic => "Diastolic pressure",
            Metric::HeartRate => "Heart rate",
            Metric::BodyTemperature => "Body temperature",
            Metric::BloodSugar => "Blood sugar",
            Metric::Cholesterol => "Cholesterol",
        }
    }
}

// ============================================================================
// SUMMARIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub total_count: usize,
    /// Rounded to one decimal; all zero when no record has an age
    pub age: SummaryStats,
    pub gender: FrequencyTable,
    pub blood_type: FrequencyTable,
    pub age_groups: BucketCounts<AgeGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetricsSummary {
    /// Only metrics with at least one non-zero value, in `Metric::ALL` order
    pub metrics: Vec<(Metric, SummaryStats)>,
    pub bmi_categories: BucketCounts<BmiCategory>,
    pub blood_pressure_categories: BucketCounts<BloodPressureCategory>,
}

impl HealthMetricsSummary {
    pub fn metric(&self, metric: Metric) -> Option<&SummaryStats> {
        self.metrics.iter().find(|(m, _)| *m == metric).map(|(_, s)| s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistorySummary {
    pub allergies: FrequencyTable,
    pub chronic_diseases: FrequencyTable,
    pub medications: FrequencyTable,
    /// Mentions across all records (sum of list lengths)
    pub allergy_total: usize,
    pub chronic_disease_total: usize,
    pub medication_total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub demographics: Demographics,
    pub health_metrics: HealthMetricsSummary,
    pub medical_history: MedicalHistorySummary,
}

// ============================================================================
// STATISTICS ENGINE
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn new() -> Self {
        StatisticsEngine
    }

    /// All three summaries, or `None` for an empty dataset
    pub fn analyze(&self, records: &[FlatRecord]) -> Option<AnalysisSummary> {
        Some(AnalysisSummary {
            demographics: self.demographics(records)?,
            health_metrics: self.health_metrics(records)?,
            medical_history: self.medical_history(records)?,
        })
    }

    pub fn demographics(&self, records: &[FlatRecord]) -> Option<Demographics> {
        if records.is_empty() {
            return None;
        }

        let ages: Vec<f64> = records.iter().filter_map(|r| r.number("age")).collect();
        let gender = FrequencyTable::from_items(records.iter().filter_map(|r| r.text("gender")));
        let blood_type =
            FrequencyTable::from_items(records.iter().filter_map(|r| r.text("blood_type")));

        let mut age_groups = BucketCounts::new(&AgeGroup::ALL);
        for age in &ages {
            age_groups.increment(AgeGroup::classify(*age));
        }

        Some(Demographics {
            total_count: records.len(),
            age: SummaryStats::from_values(&ages, 1).unwrap_or_else(SummaryStats::zero),
            gender,
            blood_type,
            age_groups,
        })
    }

    /// Per-metric statistics over present, non-zero values only; records
    /// with a zero or missing value do not count toward that metric.
    pub fn health_metrics(&self, records: &[FlatRecord]) -> Option<HealthMetricsSummary> {
        if records.is_empty() {
            return None;
        }

        let metrics = Metric::ALL
            .iter()
            .filter_map(|metric| {
                let values: Vec<f64> = records
                    .iter()
                    .filter_map(|r| r.nonzero_number(metric.field()))
                    .collect();
                SummaryStats::from_values(&values, 2).map(|stats| (*metric, stats))
            })
            .collect();

        let mut bmi_categories = BucketCounts::new(&BmiCategory::ALL);
        for bmi in records.iter().filter_map(|r| r.nonzero_number(Metric::Bmi.field())) {
            bmi_categories.increment(BmiCategory::classify(bmi));
        }

        let mut blood_pressure_categories = BucketCounts::new(&BloodPressureCategory::ALL);
        for record in records {
            if let (Some(systolic), Some(diastolic)) = (
                record.number(Metric::Systolic.field()),
                record.number(Metric::Diastolic.field()),
            ) {
                blood_pressure_categories
                    .increment(BloodPressureCategory::classify(systolic, diastolic));
            }
        }

        Some(HealthMetricsSummary {
            metrics,
            bmi_categories,
            blood_pressure_categories,
        })
    }

    pub fn medical_history(&self, records: &[FlatRecord]) -> Option<MedicalHistorySummary> {
        if records.is_empty() {
            return None;
        }

        let mentions = |field: &str| -> Vec<String> {
            records.iter().flat_map(|r| r.items(field)).collect()
        };

        let allergies = mentions("allergies");
        let chronic_diseases = mentions("chronic_diseases");
        let medications = mentions("medications");

        Some(MedicalHistorySummary {
            allergy_total: allergies.len(),
            chronic_disease_total: chronic_diseases.len(),
            medication_total: medications.len(),
            allergies: FrequencyTable::from_items(&allergies),
            chronic_diseases: FrequencyTable::from_items(&chronic_diseases),
            medications: FrequencyTable::from_items(&medications),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
