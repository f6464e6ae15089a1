// 🧍 Record Model - identity, health metrics, medical history
// Created together per generation call and never mutated afterwards

use crate::schema::{FieldValue, FlatRecord, LIST_SEPARATOR};
use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    A,
    B,
    AB,
    O,
}

impl BloodType {
    pub const ALL: [BloodType; 4] = [BloodType::A, BloodType::B, BloodType::AB, BloodType::O];

    pub fn name(&self) -> &'static str {
        match self {
            BloodType::A => "A",
            BloodType::B => "B",
            BloodType::AB => "AB",
            BloodType::O => "O",
        }
    }
}

// ============================================================================
// PERSON / METRICS / HISTORY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Centimetres, one decimal
    pub height: f64,
    /// Kilograms, one decimal
    pub weight: f64,
    pub blood_type: BloodType,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    /// Fictitious identifier: letter + {1,2} + 7 digits
    pub id_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub bmi: f64,
    pub blood_pressure_systolic: u32,
    pub blood_pressure_diastolic: u32,
    pub heart_rate: u32,
    pub body_temperature: f64,
    pub blood_sugar: f64,
    pub cholesterol: f64,
    /// `%Y-%m-%d %H:%M:%S`, local time
    pub created_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub allergies: Vec<String>,
    pub chronic_diseases: Vec<String>,
    pub medications: Vec<String>,
    pub surgeries: Vec<String>,
    pub family_history: Vec<String>,
}

// ============================================================================
// AGGREGATE RECORD
// ============================================================================

/// One generated person. Serializes to the three-group structured file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    #[serde(rename = "personal_info")]
    pub person: PersonRecord,

    #[serde(rename = "health_metrics")]
    pub health: HealthMetrics,

    #[serde(rename = "medical_history")]
    pub history: MedicalHistory,
}

impl AggregateRecord {
    pub fn new(person: PersonRecord, health: HealthMetrics, history: MedicalHistory) -> Self {
        AggregateRecord {
            person,
            health,
            history,
        }
    }

    /// Field name/value pairs in `schema::FIELDS` order
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let p = &self.person;
        let h = &self.health;
        let m = &self.history;

        vec![
            ("name", FieldValue::Text(p.name.clone())),
            ("age", FieldValue::Integer(p.age as i64)),
            ("gender", FieldValue::Text(p.gender.name().to_string())),
            ("height", FieldValue::Float(p.height)),
            ("weight", FieldValue::Float(p.weight)),
            ("blood_type", FieldValue::Text(p.blood_type.name().to_string())),
            ("phone", FieldValue::Text(p.phone.clone())),
            ("email", FieldValue::Text(p.email.clone())),
            ("address", FieldValue::Text(p.address.clone())),
            ("emergency_contact", FieldValue::Text(p.emergency_contact.clone())),
            ("id_number", FieldValue::Text(p.id_number.clone())),
            ("bmi", FieldValue::Float(h.bmi)),
            ("blood_pressure_systolic", FieldValue::Integer(h.blood_pressure_systolic as i64)),
            ("blood_pressure_diastolic", FieldValue::Integer(h.blood_pressure_diastolic as i64)),
            ("heart_rate", FieldValue::Integer(h.heart_rate as i64)),
            ("body_temperature", FieldValue::Float(h.body_temperature)),
            ("blood_sugar", FieldValue::Float(h.blood_sugar)),
            ("cholesterol", FieldValue::Float(h.cholesterol)),
            ("created_date", FieldValue::Text(h.created_date.clone())),
            ("allergies", FieldValue::List(m.allergies.clone())),
            ("chronic_diseases", FieldValue::List(m.chronic_diseases.clone())),
            ("medications", FieldValue::List(m.medications.clone())),
            ("surgeries", FieldValue::List(m.surgeries.clone())),
            ("family_history", FieldValue::List(m.family_history.clone())),
        ]
    }

    /// One tabular row; list fields joined with `; `
    pub fn to_row(&self) -> Vec<String> {
        self.fields()
            .into_iter()
            .map(|(_, value)| match value {
                FieldValue::List(items) => items.join(LIST_SEPARATOR),
                other => other.to_string(),
            })
            .collect()
    }

    /// Flattened form, as the analyzer sees records loaded from disk
    pub fn to_flat(&self) -> FlatRecord {
        let mut flat = FlatRecord::new();
        for (name, value) in self.fields() {
            flat.insert(name, value);
        }
        flat
    }
}

// ============================================================================
// TESTS
// ============================================================================
