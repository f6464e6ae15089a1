// 📝 Report Formatter - fixed-layout plain text report
// Same summaries in, same text out.

use crate::schema::{field_kind, FieldKind};
use crate::statistics::{
    percentage, AnalysisSummary, Demographics, HealthMetricsSummary, MedicalHistorySummary,
    Metric,
};

pub const REPORT_TITLE: &str = "Health Data Analysis Report";
pub const REPORT_FOOTER: &str = "End of report";

/// Returned instead of a report when there is nothing to analyse
pub const NO_DATA_REPORT: &str = "No data available for analysis";

/// Entries listed per medical-history frequency table
pub const TOP_N: usize = 5;

const BANNER_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 30;

// ============================================================================
// REPORT FORMATTER
// ============================================================================

pub struct ReportFormatter {
    lines: Vec<String>,
}

impl ReportFormatter {
    pub fn new() -> Self {
        ReportFormatter { lines: Vec::new() }
    }

    /// Render the three summaries. Percentages are shares of the
    /// demographics total.
    pub fn format(
        mut self,
        demographics: &Demographics,
        health_metrics: &HealthMetricsSummary,
        medical_history: &MedicalHistorySummary,
    ) -> String {
        let banner = "=".repeat(BANNER_WIDTH);

        self.push(&banner);
        self.push(REPORT_TITLE);
        self.push(&banner);
        self.push("");

        self.demographics_section(demographics);
        self.push("");

        self.health_metrics_section(health_metrics, demographics.total_count);
        self.push("");

        self.medical_history_section(medical_history);
        self.push("");

        self.push(&banner);
        self.push(REPORT_FOOTER);
        self.push(&banner);

        self.lines.join("\n")
    }

    fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn section_header(&mut self, title: &str) {
        self.push(title);
        self.push(&"-".repeat(SECTION_RULE_WIDTH));
    }

    fn share_line(&mut self, label: &str, count: usize, total: usize) {
        self.lines.push(format!(
            "  {}: {} people ({:.1}%)",
            label,
            count,
            percentage(count, total)
        ));
    }

    fn demographics_section(&mut self, demographics: &Demographics) {
        let total = demographics.total_count;
        let age = &demographics.age;

        self.section_header("📊 Demographics");
        self.lines.push(format!("Total people: {}", total));
        self.lines.push(format!("Mean age: {} years", age.mean));
        self.lines
            .push(format!("Age range: {} - {} years", age.min, age.max));

        self.push("Gender distribution:");
        for (gender, count) in demographics.gender.entries() {
            self.share_line(gender, *count, total);
        }

        self.push("Age groups:");
        for (group, count) in demographics.age_groups.iter() {
            self.share_line(group.label(), count, total);
        }
    }

    fn health_metrics_section(&mut self, health_metrics: &HealthMetricsSummary, total: usize) {
        self.section_header("🏥 Health Metrics");

        for (metric, stats) in &health_metrics.metrics {
            self.lines.push(format!("{}:", metric.label()));
            self.lines
                .push(format!("  Mean: {}", metric_value(*metric, stats.mean)));
            self.lines.push(format!(
                "  Range: {} - {}",
                metric_value(*metric, stats.min),
                metric_value(*metric, stats.max)
            ));
        }

        self.push("BMI categories:");
        for (category, count) in health_metrics.bmi_categories.iter() {
            self.share_line(category.label(), count, total);
        }

        self.push("Blood pressure categories:");
        for (category, count) in health_metrics.blood_pressure_categories.iter() {
            self.share_line(category.label(), count, total);
        }
    }

    fn medical_history_section(&mut self, medical_history: &MedicalHistorySummary) {
        self.section_header("📋 Medical History");

        self.lines
            .push(format!("Most common allergies (top {}):", TOP_N));
        for (allergy, count) in medical_history.allergies.top(TOP_N) {
            self.lines.push(format!("  {}: {} people", allergy, count));
        }

        self.lines
            .push(format!("Most common chronic diseases (top {}):", TOP_N));
        for (disease, count) in medical_history.chronic_diseases.top(TOP_N) {
            self.lines.push(format!("  {}: {} people", disease, count));
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Float-valued metrics always show a decimal (`23.0`); integer-valued
/// ones print bare unless the value is fractional (`72`, `72.5`).
fn metric_value(metric: Metric, value: f64) -> String {
    match field_kind(metric.field()) {
        FieldKind::Float if value.fract() == 0.0 => format!("{:.1}", value),
        _ => value.to_string(),
    }
}

/// Render the three summaries as report text
pub fn format_report(
    demographics: &Demographics,
    health_metrics: &HealthMetricsSummary,
    medical_history: &MedicalHistorySummary,
) -> String {
    ReportFormatter::new().format(demographics, health_metrics, medical_history)
}

/// Report text for an analysis, or the no-data text when there was none
pub fn render(summary: Option<&AnalysisSummary>) -> String {
    match summary {
        Some(s) => format_report(&s.demographics, &s.health_metrics, &s.medical_history),
        None => NO_DATA_REPORT.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldValue, FlatRecord};
    use crate::statistics::StatisticsEngine;

    fn person(age: i64, gender: &str, allergies: &str, chronic: &str) -> FlatRecord {
        let mut r = FlatRecord::new();
        r.insert("age", FieldValue::Integer(age));
        r.insert("gender", FieldValue::Text(gender.to_string()));
        r.insert("bmi", FieldValue::Float(23.4));
        r.insert("blood_pressure_systolic", FieldValue::Integer(125));
        r.insert("blood_pressure_diastolic", FieldValue::Integer(70));
        r.insert("heart_rate", FieldValue::Integer(72));
        r.insert("allergies", FieldValue::Text(allergies.to_string()));
        r.insert("chronic_diseases", FieldValue::Text(chronic.to_string()));
        r
    }

    fn sample() -> Vec<FlatRecord> {
        vec![
            person(25, "Male", "Pollen; Dust mites", "Hypertension"),
            person(40, "Female", "Dust mites", ""),
            person(52, "Female", "Milk; Pollen", "Diabetes"),
            person(80, "Male", "", "Hypertension"),
        ]
    }

    fn report_for(records: &[FlatRecord]) -> String {
        render(StatisticsEngine::new().analyze(records).as_ref())
    }

    #[test]
    fn test_sections_in_order() {
        let report = report_for(&sample());

        let demographics = report.find("📊 Demographics").unwrap();
        let metrics = report.find("🏥 Health Metrics").unwrap();
        let history = report.find("📋 Medical History").unwrap();
        assert!(demographics < metrics);
        assert!(metrics < history);

        assert!(report.starts_with(&"=".repeat(60)));
        assert!(report.ends_with(&"=".repeat(60)));
        assert!(report.contains(REPORT_TITLE));
        assert!(report.contains(REPORT_FOOTER));
    }

    #[test]
    fn test_percentages_use_total() {
        let report = report_for(&sample());

        assert!(report.contains("Total people: 4"));
        assert!(report.contains("  Male: 2 people (50.0%)"));
        assert!(report.contains("  18-30: 1 people (25.0%)"));
        assert!(report.contains("  61-75: 0 people (0.0%)"));
        assert!(report.contains("  Elevated (120-129/<80): 4 people (100.0%)"));
        assert!(report.contains("Age range: 25 - 80 years"));
    }

    #[test]
    fn test_top_lists_keep_first_seen_on_ties() {
        let report = report_for(&sample());

        let pollen = report.find("  Pollen: 2 people").unwrap();
        let dust = report.find("  Dust mites: 2 people").unwrap();
        let milk = report.find("  Milk: 1 people").unwrap();
        assert!(pollen < dust);
        assert!(dust < milk);

        let hypertension = report.find("  Hypertension: 2 people").unwrap();
        let diabetes = report.find("  Diabetes: 1 people").unwrap();
        assert!(hypertension < diabetes);
    }

    #[test]
    fn test_top_list_is_capped() {
        let records: Vec<FlatRecord> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|a| person(30, "Male", a, ""))
            .collect();
        let report = report_for(&records);

        assert!(report.contains("  E: 1 people"));
        assert!(!report.contains("  F: 1 people"));
    }

    #[test]
    fn test_metrics_without_values_are_omitted() {
        let report = report_for(&sample());

        assert!(report.contains("Heart rate:"));
        assert!(report.contains("  Mean: 72"));
        assert!(!report.contains("Cholesterol:"));
    }

    #[test]
    fn test_float_metrics_keep_a_decimal() {
        let mut a = person(30, "Male", "", "");
        a.insert("bmi", FieldValue::Float(22.0));
        a.insert("heart_rate", FieldValue::Integer(70));
        let mut b = person(30, "Male", "", "");
        b.insert("bmi", FieldValue::Float(24.0));
        b.insert("heart_rate", FieldValue::Integer(75));
        let report = report_for(&[a, b]);

        assert!(report.contains("BMI:\n  Mean: 23.0\n  Range: 22.0 - 24.0"));
        assert!(report.contains("Heart rate:\n  Mean: 72.5\n  Range: 70 - 75"));
    }

    #[test]
    fn test_report_is_idempotent() {
        let records = sample();
        assert_eq!(report_for(&records), report_for(&records));
    }

    #[test]
    fn test_empty_dataset_gives_no_data_text() {
        assert_eq!(report_for(&[]), NO_DATA_REPORT);
    }
}
