//! Diabetes risk prediction on top of an injected classifier.
//!
//! The service validates the seven health measurements, runs them through
//! the `Classifier`, and turns the class and probability into a label and a
//! templated piece of advice.

use std::{fmt, sync::Arc};

use glucoscope_adapters::{Classifier, FeatureVector};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const HIGH_RISK_THRESHOLD: f64 = 0.80;
pub const MODERATE_RISK_THRESHOLD: f64 = 0.50;

const PREDICTION_FAILED: &str = "Internal Server Error. Please check the model and input data.";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DiabetesInput {
    #[serde(rename = "Pregnancies")]
    pub pregnancies: f64,
    #[serde(rename = "Glucose")]
    pub glucose: f64,
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: f64,
    #[serde(rename = "Insulin")]
    pub insulin: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree_function: f64,
    #[serde(rename = "Age")]
    pub age: f64,
}

impl DiabetesInput {
    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("Pregnancies", self.pregnancies),
            ("Glucose", self.glucose),
            ("BloodPressure", self.blood_pressure),
            ("Insulin", self.insulin),
            ("BMI", self.bmi),
            ("DiabetesPedigreeFunction", self.diabetes_pedigree_function),
            ("Age", self.age),
        ]
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Validation(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }

    pub fn to_features(&self) -> FeatureVector {
        FeatureVector(self.fields().map(|(_, value)| value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Diabetic")]
    Diabetic,
    #[serde(rename = "Non-Diabetic")]
    NonDiabetic,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diabetic => write!(f, "Diabetic"),
            Self::NonDiabetic => write!(f, "Non-Diabetic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
    pub advice: &'static str,
}

impl Prediction {
    /// Renders the probability as a percentage with two decimals.
    pub fn probability_percent(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

pub fn advice_for(label: Label, probability: f64) -> &'static str {
    match label {
        Label::Diabetic if probability > HIGH_RISK_THRESHOLD => {
            "You are at high risk for diabetes. Please consult a doctor immediately!"
        }
        Label::Diabetic if probability > MODERATE_RISK_THRESHOLD => {
            "You have a moderate risk for diabetes. Consider lifestyle changes and check with a doctor."
        }
        Label::Diabetic => "You have a low risk but should still maintain a healthy lifestyle.",
        Label::NonDiabetic => {
            "Great news! You are not diabetic. Keep maintaining a healthy lifestyle!"
        }
    }
}

#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn predict(&self, input: &DiabetesInput) -> Result<Prediction, AppError> {
        input.validate()?;

        let classification = self
            .classifier
            .predict(&input.to_features())
            .map_err(|err| AppError::internal(PREDICTION_FAILED, err))?;

        if !(0.0..=1.0).contains(&classification.probability) {
            return Err(AppError::internal(
                PREDICTION_FAILED,
                format!("probability {} outside [0, 1]", classification.probability),
            ));
        }

        let label = if classification.is_positive() {
            Label::Diabetic
        } else {
            Label::NonDiabetic
        };

        Ok(Prediction {
            label,
            probability: classification.probability,
            advice: advice_for(label, classification.probability),
        })
    }
}
