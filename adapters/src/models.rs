//! Generic data models for the `adapters` crate.
//!
//! These models define the inputs and outputs exchanged with the external
//! collaborators (the pre-fitted classifier and the text-generation service),
//! so the backend services can work against a consistent data format.

use serde::{Deserialize, Serialize};

/// Number of health measurements the classifier consumes.
pub const FEATURE_COUNT: usize = 7;

/// Column order the classifier was fitted on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

/// Input row for the classifier, ordered as [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Output of a single classifier call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted class: 1 for diabetic, 0 otherwise.
    pub class: u8,
    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
}

impl Classification {
    pub fn is_positive(&self) -> bool {
        self.class == 1
    }
}

/// Request body accepted by hosted text-generation inference endpoints.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub inputs: &'a str,
}

/// One candidate in a text-generation response.
#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}
