// 📋 Record Entity - One stored BMI computation
// Input values are the source of truth; bmi and category are derived once at creation

use crate::bmi::{classify, compute_bmi, BmiCategory};
use serde::{Deserialize, Serialize};

/// Message returned to callers when weight or height is unusable
pub const INVALID_INPUT_MESSAGE: &str =
    "Invalid input. Please enter valid positive numbers for weight and height.";

// ============================================================================
// RECORD
// ============================================================================

/// A single BMI record
///
/// Fields are private so (weight, height, bmi, category) cannot drift apart
/// after construction. Deserializing goes through `StoredRecord`, which
/// rebuilds the derived fields and rejects rows that disagree with them.
/// Field order here is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord")]
pub struct Record {
    name: String,
    weight_kg: f64,
    height_m: f64,
    bmi: f64,
    category: BmiCategory,
}

impl Record {
    /// Create a record, deriving bmi and category from the measurements
    pub fn new(name: impl Into<String>, weight_kg: f64, height_m: f64) -> Self {
        let bmi = compute_bmi(weight_kg, height_m);

        Record {
            name: name.into(),
            weight_kg,
            height_m,
            bmi,
            category: classify(bmi),
        }
    }

    /// Validate raw text input and build a record from it
    pub fn from_input(name: &str, weight: &str, height: &str) -> Result<Self, InvalidInput> {
        let weight_kg = parse_measurement(weight).ok_or(InvalidInput)?;
        let height_m = parse_measurement(height).ok_or(InvalidInput)?;

        Ok(Record::new(name, weight_kg, height_m))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn category(&self) -> BmiCategory {
        self.category
    }
}

// ============================================================================
// STORED FORM
// ============================================================================

/// A record as read from disk, before its derived fields are checked
#[derive(Debug, Deserialize)]
pub struct StoredRecord {
    name: String,
    weight_kg: f64,
    height_m: f64,
    bmi: f64,
    category: BmiCategory,
}

impl TryFrom<StoredRecord> for Record {
    type Error = String;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        for (field, value) in [("weight_kg", stored.weight_kg), ("height_m", stored.height_m)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!(
                    "record {:?}: {} must be a positive number, got {}",
                    stored.name, field, value
                ));
            }
        }

        let rebuilt = Record::new(stored.name, stored.weight_kg, stored.height_m);

        // Stored values come from the same f64 division; allow only rounding noise
        let tolerance = 1e-9 * rebuilt.bmi.abs().max(1.0);
        if (rebuilt.bmi - stored.bmi).abs() > tolerance {
            return Err(format!(
                "record {:?}: bmi {} does not match weight/height (expected {})",
                rebuilt.name, stored.bmi, rebuilt.bmi
            ));
        }
        if rebuilt.category != stored.category {
            return Err(format!(
                "record {:?}: category {} does not match bmi (expected {})",
                rebuilt.name, stored.category, rebuilt.category
            ));
        }

        Ok(rebuilt)
    }
}

// ============================================================================
// INPUT VALIDATION
// ============================================================================

/// Weight or height was non-numeric, non-finite, or not positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidInput;

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(INVALID_INPUT_MESSAGE)
    }
}

impl std::error::Error for InvalidInput {}

/// Parse a measurement: a finite number strictly greater than zero
/// No upper bound is enforced, and surrounding whitespace is not accepted.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let value: f64 = raw.parse().ok()?;

    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================
