// 📐 Field Schema - explicit, order-stable field lists
// Every field of the flattened record is declared once here; the tabular
// header, row layout and load-time coercion are all driven from this table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// FIELD DEFINITIONS
// ============================================================================

/// Which named group of the structured per-record file a field lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGroup {
    PersonalInfo,
    HealthMetrics,
    MedicalHistory,
}

impl FieldGroup {
    /// Key of the group in the structured per-record file
    pub fn key(&self) -> &'static str {
        match self {
            FieldGroup::PersonalInfo => "personal_info",
            FieldGroup::HealthMetrics => "health_metrics",
            FieldGroup::MedicalHistory => "medical_history",
        }
    }

    pub const ALL: [FieldGroup; 3] = [
        FieldGroup::PersonalInfo,
        FieldGroup::HealthMetrics,
        FieldGroup::MedicalHistory,
    ];
}

/// How a tabular cell is coerced on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    /// Serialized as a `; `-joined string in the tabular file
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub group: FieldGroup,
    pub kind: FieldKind,
}

const fn field(name: &'static str, group: FieldGroup, kind: FieldKind) -> FieldDefinition {
    FieldDefinition { name, group, kind }
}

/// All flattened fields in tabular column order
pub const FIELDS: &[FieldDefinition] = &[
    // Identity
    field("name", FieldGroup::PersonalInfo, FieldKind::Text),
    field("age", FieldGroup::PersonalInfo, FieldKind::Integer),
    field("gender", FieldGroup::PersonalInfo, FieldKind::Text),
    field("height", FieldGroup::PersonalInfo, FieldKind::Float),
    field("weight", FieldGroup::PersonalInfo, FieldKind::Float),
    field("blood_type", FieldGroup::PersonalInfo, FieldKind::Text),
    field("phone", FieldGroup::PersonalInfo, FieldKind::Text),
    field("email", FieldGroup::PersonalInfo, FieldKind::Text),
    field("address", FieldGroup::PersonalInfo, FieldKind::Text),
    field("emergency_contact", FieldGroup::PersonalInfo, FieldKind::Text),
    field("id_number", FieldGroup::PersonalInfo, FieldKind::Text),
    // Metrics
    field("bmi", FieldGroup::HealthMetrics, FieldKind::Float),
    field("blood_pressure_systolic", FieldGroup::HealthMetrics, FieldKind::Integer),
    field("blood_pressure_diastolic", FieldGroup::HealthMetrics, FieldKind::Integer),
    field("heart_rate", FieldGroup::HealthMetrics, FieldKind::Integer),
    field("body_temperature", FieldGroup::HealthMetrics, FieldKind::Float),
    field("blood_sugar", FieldGroup::HealthMetrics, FieldKind::Float),
    field("cholesterol", FieldGroup::HealthMetrics, FieldKind::Float),
    field("created_date", FieldGroup::HealthMetrics, FieldKind::Text),
    // History
    field("allergies", FieldGroup::MedicalHistory, FieldKind::List),
    field("chronic_diseases", FieldGroup::MedicalHistory, FieldKind::List),
    field("medications", FieldGroup::MedicalHistory, FieldKind::List),
    field("surgeries", FieldGroup::MedicalHistory, FieldKind::List),
    field("family_history", FieldGroup::MedicalHistory, FieldKind::List),
];

/// Separator used when list fields are flattened into one cell
pub const LIST_SEPARATOR: &str = "; ";

/// Tabular header row
pub fn header() -> Vec<&'static str> {
    FIELDS.iter().map(|f| f.name).collect()
}

pub fn fields_in(group: FieldGroup) -> impl Iterator<Item = &'static FieldDefinition> {
    FIELDS.iter().filter(move |f| f.group == group)
}

/// Kind of a known field; unknown columns are kept as text
pub fn field_kind(name: &str) -> FieldKind {
    FIELDS
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.kind)
        .unwrap_or(FieldKind::Text)
}

// ============================================================================
// FIELD VALUES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Falsy values: zero, empty text, empty list
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Integer(i) => *i != 0,
            FieldValue::Float(f) => *f != 0.0,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(items) => !items.is_empty(),
        }
    }

    /// Coerce one tabular cell according to the field's kind.
    /// Empty or blank numeric cells default to zero.
    pub fn from_cell(field: &str, raw: &str) -> Result<FieldValue, String> {
        match field_kind(field) {
            FieldKind::Integer => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(FieldValue::Integer(0));
                }
                raw.parse::<i64>()
                    .map(FieldValue::Integer)
                    .map_err(|e| format!("field '{}': invalid integer '{}': {}", field, raw, e))
            }
            FieldKind::Float => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return Ok(FieldValue::Float(0.0));
                }
                raw.parse::<f64>()
                    .map(FieldValue::Float)
                    .map_err(|e| format!("field '{}': invalid float '{}': {}", field, raw, e))
            }
            FieldKind::Text | FieldKind::List => Ok(FieldValue::Text(raw.to_string())),
        }
    }

    /// Convert a value read from a structured per-record file.
    /// `null` is treated as an absent field.
    pub fn from_json(value: &serde_json::Value) -> Option<FieldValue> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Integer(i)),
                None => n.as_f64().map(FieldValue::Float),
            },
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(items) => Some(FieldValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Value::Object(_) => Some(FieldValue::Text(value.to_string())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::List(items) => write!(f, "{}", items.join(LIST_SEPARATOR)),
        }
    }
}

// ============================================================================
// FLAT RECORD
// ============================================================================

/// One person as loaded back from disk: field name to value.
///
/// Fields may be missing (structured files written by other tools), so
/// every accessor is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    fields: HashMap<String, FieldValue>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Numeric value of a field, if present and numeric
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    /// Numeric value only when present and non-zero
    pub fn nonzero_number(&self, field: &str) -> Option<f64> {
        self.get(field)
            .filter(|v| v.is_truthy())
            .and_then(FieldValue::as_number)
    }

    /// Display form of any present field
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(|v| v.to_string())
    }

    /// Items of a list field. Tabular rows hold `;`-joined text which is
    /// split and trimmed here; empty items are dropped.
    pub fn items(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            Some(FieldValue::List(items)) => items.clone(),
            Some(FieldValue::Text(joined)) => joined
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_grouped_in_order() {
        let header = header();
        assert_eq!(header.len(), 24);
        assert_eq!(header[0], "name");
        assert_eq!(header[11], "bmi");
        assert_eq!(header[19], "allergies");
        assert_eq!(fields_in(FieldGroup::PersonalInfo).count(), 11);
        assert_eq!(fields_in(FieldGroup::HealthMetrics).count(), 8);
        assert_eq!(fields_in(FieldGroup::MedicalHistory).count(), 5);
    }

    #[test]
    fn test_cell_coercion() {
        assert_eq!(FieldValue::from_cell("age", "42"), Ok(FieldValue::Integer(42)));
        assert_eq!(FieldValue::from_cell("age", ""), Ok(FieldValue::Integer(0)));
        assert_eq!(FieldValue::from_cell("bmi", "23.45"), Ok(FieldValue::Float(23.45)));
        assert_eq!(FieldValue::from_cell("cholesterol", ""), Ok(FieldValue::Float(0.0)));
        assert_eq!(
            FieldValue::from_cell("allergies", "Milk; Eggs"),
            Ok(FieldValue::Text("Milk; Eggs".to_string()))
        );
        assert_eq!(
            FieldValue::from_cell("some_extra_column", "7"),
            Ok(FieldValue::Text("7".to_string()))
        );
        assert!(FieldValue::from_cell("heart_rate", "fast").is_err());
    }

    #[test]
    fn test_blank_numeric_cells_are_zero() {
        assert_eq!(FieldValue::from_cell("age", "   "), Ok(FieldValue::Integer(0)));
        assert_eq!(FieldValue::from_cell("bmi", "\t"), Ok(FieldValue::Float(0.0)));
        assert_eq!(FieldValue::from_cell("heart_rate", " 72 "), Ok(FieldValue::Integer(72)));
    }

    #[test]
    fn test_json_conversion() {
        let value = serde_json::json!(["Milk", "Eggs"]);
        assert_eq!(
            FieldValue::from_json(&value),
            Some(FieldValue::List(vec!["Milk".to_string(), "Eggs".to_string()]))
        );
        assert_eq!(FieldValue::from_json(&serde_json::json!(30)), Some(FieldValue::Integer(30)));
        assert_eq!(FieldValue::from_json(&serde_json::json!(36.6)), Some(FieldValue::Float(36.6)));
        assert_eq!(FieldValue::from_json(&serde_json::Value::Null), None);
    }

    #[test]
    fn test_items_split_and_trim() {
        let mut record = FlatRecord::new();
        record.insert("allergies", FieldValue::Text(" Milk ;Eggs;; ".to_string()));
        record.insert("medications", FieldValue::List(vec!["Vitamins".to_string()]));
        record.insert("surgeries", FieldValue::Text(String::new()));

        assert_eq!(record.items("allergies"), vec!["Milk", "Eggs"]);
        assert_eq!(record.items("medications"), vec!["Vitamins"]);
        assert!(record.items("surgeries").is_empty());
        assert!(record.items("family_history").is_empty());
    }

    #[test]
    fn test_nonzero_number_excludes_falsy() {
        let mut record = FlatRecord::new();
        record.insert("heart_rate", FieldValue::Integer(0));
        record.insert("bmi", FieldValue::Float(22.5));
        record.insert("name", FieldValue::Text("王小明".to_string()));

        assert_eq!(record.number("heart_rate"), Some(0.0));
        assert_eq!(record.nonzero_number("heart_rate"), None);
        assert_eq!(record.nonzero_number("bmi"), Some(22.5));
        assert_eq!(record.nonzero_number("name"), None);
        assert_eq!(record.nonzero_number("cholesterol"), None);
    }
}
