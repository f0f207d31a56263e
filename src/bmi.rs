// ⚖️ BMI Engine - Pure arithmetic + range classification
// weight(kg) / height(m)² and the four standard adult bands

use serde::{Deserialize, Serialize};

// ============================================================================
// BAND LIMITS
// ============================================================================

/// Lower bound of the Normal Weight band (inclusive)
pub const NORMAL_MIN: f64 = 18.5;

/// Lower bound of the Overweight band (inclusive)
pub const OVERWEIGHT_MIN: f64 = 25.0;

/// Lower bound of the Obesity band (inclusive)
pub const OBESITY_MIN: f64 = 30.0;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,

    #[serde(rename = "Normal Weight")]
    NormalWeight,

    #[serde(rename = "Overweight")]
    Overweight,

    #[serde(rename = "Obesity")]
    Obesity,

    /// Only reachable for NaN input
    #[serde(rename = "Cannot interpret")]
    CannotInterpret,
}

impl BmiCategory {
    /// All categories in band order
    pub const ALL: [BmiCategory; 5] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::Obesity,
        BmiCategory::CannotInterpret,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
            BmiCategory::CannotInterpret => "Cannot interpret",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Compute the Body Mass Index
///
/// Returns exactly 0.0 when the height is not positive (or NaN), so callers
/// never see NaN or infinity from a bad divisor.
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> f64 {
    if height_m <= 0.0 || height_m.is_nan() {
        return 0.0;
    }

    weight_kg / (height_m * height_m)
}

/// Classify a BMI value into its band
///
/// Bands are half-open so every finite value lands in exactly one of them:
/// 24.95 is Normal Weight, 29.95 is Overweight.
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi.is_nan() {
        BmiCategory::CannotInterpret
    } else if bmi < NORMAL_MIN {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_MIN {
        BmiCategory::NormalWeight
    } else if bmi < OBESITY_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.005
    }

    #[test]
    fn test_compute_bmi_formula() {
        for (w, h) in [(75.5, 1.75), (50.0, 1.60), (120.0, 1.90), (0.5, 0.3)] {
            assert_eq!(compute_bmi(w, h), w / (h * h));
        }
    }

    #[test]
    fn test_compute_bmi_non_positive_height() {
        assert_eq!(compute_bmi(70.0, 0.0), 0.0);
        assert_eq!(compute_bmi(70.0, -1.8), 0.0);
        assert_eq!(compute_bmi(70.0, -0.0), 0.0);
        assert_eq!(compute_bmi(70.0, f64::NAN), 0.0);

        let bmi = compute_bmi(70.0, 0.0);
        assert!(bmi.is_finite());
        assert!(!bmi.is_sign_negative());
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(18.49), BmiCategory::Underweight);
        assert_eq!(classify(18.5), BmiCategory::NormalWeight);
        assert_eq!(classify(24.9), BmiCategory::NormalWeight);
        assert_eq!(classify(25.0), BmiCategory::Overweight);
        assert_eq!(classify(29.9), BmiCategory::Overweight);
        assert_eq!(classify(30.0), BmiCategory::Obesity);
    }

    #[test]
    fn test_classify_has_no_gaps() {
        assert_eq!(classify(24.95), BmiCategory::NormalWeight);
        assert_eq!(classify(24.999_999), BmiCategory::NormalWeight);
        assert_eq!(classify(29.95), BmiCategory::Overweight);
        assert_eq!(classify(29.999_999), BmiCategory::Overweight);

        // Walk 0.00..=40.00 in hundredths; only NaN may be uninterpretable
        for i in 0..=4000 {
            let bmi = i as f64 / 100.0;
            assert_ne!(classify(bmi), BmiCategory::CannotInterpret, "gap at {}", bmi);
        }
    }

    #[test]
    fn test_classify_degenerate_input() {
        assert_eq!(classify(f64::NAN), BmiCategory::CannotInterpret);
        assert_eq!(classify(-3.0), BmiCategory::Underweight);
        assert_eq!(classify(0.0), BmiCategory::Underweight);
        assert_eq!(classify(f64::INFINITY), BmiCategory::Obesity);
    }

    #[test]
    fn test_scenarios() {
        let bmi = compute_bmi(75.5, 1.75);
        assert!(approx(bmi, 24.65), "got {}", bmi);
        assert_eq!(classify(bmi), BmiCategory::NormalWeight);

        let bmi = compute_bmi(50.0, 1.60);
        assert!(approx(bmi, 19.53), "got {}", bmi);
        assert_eq!(classify(bmi), BmiCategory::NormalWeight);
    }

    #[test]
    fn test_category_serializes_as_label() {
        for category in BmiCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            let back: BmiCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }
}
