// 🎲 Record Generator - one synthetic person per call
// Independent uniform sampling from the value pools; BMI is the only
// derived field.

use crate::error::{HealthDataError, Result};
use crate::pools::{
    ValuePools, MAX_ALLERGIES, MAX_CHRONIC_DISEASES, MAX_FAMILY_HISTORY, MAX_MEDICATIONS,
    MAX_SURGERIES,
};
use crate::records::{AggregateRecord, BloodType, Gender, HealthMetrics, MedicalHistory, PersonRecord};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const PHONE_PREFIX: &str = "09";
const ID_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CREATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// DERIVED VALUES
// ============================================================================

/// Round to `places` decimals on the exact binary value, ties to even.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// BMI = kg / m², two decimals. Used both at generation and in checks on
/// loaded data, so it must stay the single definition.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to(weight_kg / (height_m * height_m), 2)
}

/// Blood sugar and cholesterol scale by 1% per year away from 30
pub fn age_factor(age: u32) -> f64 {
    1.0 + (age as f64 - 30.0) * 0.01
}

// ============================================================================
// SAMPLING HELPERS
// ============================================================================

fn pick<'a>(rng: &mut StdRng, pool_name: &str, pool: &'a [String]) -> Result<&'a String> {
    pool.choose(rng).ok_or_else(|| HealthDataError::EmptyPool {
        pool: pool_name.to_string(),
    })
}

/// Draw 0..=max distinct items without replacement
fn sample_subset(rng: &mut StdRng, pool_name: &str, pool: &[String], max: usize) -> Result<Vec<String>> {
    let k = rng.random_range(0..=max);
    if k == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(HealthDataError::EmptyPool {
            pool: pool_name.to_string(),
        });
    }
    if k > pool.len() {
        return Err(HealthDataError::InvalidConfig(format!(
            "pool '{}' has {} entries, cannot draw {}",
            pool_name,
            pool.len(),
            k
        )));
    }

    Ok(pool.choose_multiple(rng, k).cloned().collect())
}

fn digits(rng: &mut StdRng, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

// ============================================================================
// RECORD GENERATOR
// ============================================================================

pub struct RecordGenerator {
    pools: Arc<ValuePools>,
    rng: StdRng,
}

impl RecordGenerator {
    /// Generator seeded from OS entropy
    pub fn new(pools: Arc<ValuePools>) -> Self {
        RecordGenerator {
            pools,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible generator
    pub fn with_seed(pools: Arc<ValuePools>, seed: u64) -> Self {
        RecordGenerator {
            pools,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Surname + 1-2 given-name fragments, each drawn with replacement
    pub fn generate_name(&mut self) -> Result<String> {
        let mut name = pick(&mut self.rng, "surnames", &self.pools.surnames)?.clone();

        let given_count = self.rng.random_range(1..=2);
        for _ in 0..given_count {
            name.push_str(pick(&mut self.rng, "given_names", &self.pools.given_names)?);
        }

        Ok(name)
    }

    pub fn generate_phone(&mut self) -> String {
        format!("{}{}", PHONE_PREFIX, digits(&mut self.rng, 8))
    }

    pub fn generate_email(&mut self) -> Result<String> {
        let suffix: u32 = self.rng.random_range(1000..=9999);
        let domain = pick(&mut self.rng, "email_domains", &self.pools.email_domains)?;
        Ok(format!("user{}@{}", suffix, domain))
    }

    /// Fictitious format, not a real identity scheme
    pub fn generate_id_number(&mut self) -> String {
        let letter = char::from(ID_LETTERS[self.rng.random_range(0..ID_LETTERS.len())]);
        let marker: u8 = self.rng.random_range(1..=2);
        format!("{}{}{}", letter, marker, digits(&mut self.rng, 7))
    }

    pub fn generate_person(&mut self) -> Result<PersonRecord> {
        let name = self.generate_name()?;
        let age: u32 = self.rng.random_range(18..=80);
        let gender = Gender::ALL[self.rng.random_range(0..Gender::ALL.len())];

        let (height, weight) = match gender {
            Gender::Male => (
                self.rng.random_range(160.0..185.0),
                self.rng.random_range(55.0..90.0),
            ),
            Gender::Female => (
                self.rng.random_range(150.0..175.0),
                self.rng.random_range(45.0..75.0),
            ),
        };

        let blood_type = BloodType::ALL[self.rng.random_range(0..BloodType::ALL.len())];
        let phone = self.generate_phone();
        let email = self.generate_email()?;
        let address = pick(&mut self.rng, "addresses", &self.pools.addresses)?.clone();
        let emergency_contact = self.generate_phone();
        let id_number = self.generate_id_number();

        Ok(PersonRecord {
            name,
            age,
            gender,
            height: round_to(height, 1),
            weight: round_to(weight, 1),
            blood_type,
            phone,
            email,
            address,
            emergency_contact,
            id_number,
        })
    }

    /// Metrics for `person`. Blood pressure, heart rate and temperature are
    /// independent of age and BMI.
    pub fn generate_health(&mut self, person: &PersonRecord) -> HealthMetrics {
        let factor = age_factor(person.age);

        HealthMetrics {
            bmi: calculate_bmi(person.height, person.weight),
            blood_pressure_systolic: self.rng.random_range(110..=140),
            blood_pressure_diastolic: self.rng.random_range(70..=90),
            heart_rate: self.rng.random_range(60..=100),
            body_temperature: round_to(self.rng.random_range(36.0..=37.5), 1),
            blood_sugar: round_to(self.rng.random_range(80.0..=120.0) * factor, 1),
            cholesterol: round_to(self.rng.random_range(150.0..=250.0) * factor, 1),
            created_date: chrono::Local::now().format(CREATED_DATE_FORMAT).to_string(),
        }
    }

    pub fn generate_medical_history(&mut self) -> Result<MedicalHistory> {
        let pools = &self.pools;
        let rng = &mut self.rng;

        Ok(MedicalHistory {
            allergies: sample_subset(rng, "allergies", &pools.allergies, MAX_ALLERGIES)?,
            chronic_diseases: sample_subset(
                rng,
                "chronic_diseases",
                &pools.chronic_diseases,
                MAX_CHRONIC_DISEASES,
            )?,
            medications: sample_subset(rng, "medications", &pools.medications, MAX_MEDICATIONS)?,
            surgeries: sample_subset(rng, "surgeries", &pools.surgeries, MAX_SURGERIES)?,
            family_history: sample_subset(
                rng,
                "family_history",
                &pools.family_history,
                MAX_FAMILY_HISTORY,
            )?,
        })
    }

    /// Identity, metrics and history for one person
    pub fn generate_record(&mut self) -> Result<AggregateRecord> {
        let person = self.generate_person()?;
        let health = self.generate_health(&person);
        let history = self.generate_medical_history()?;

        Ok(AggregateRecord::new(person, health, history))
    }
}

// ============================================================================
// TESTS
// ============================================================================
