//! Logistic-regression implementation of the `Classifier` trait.
//!
//! The artifact is a JSON export of a standardized logistic regression:
//! per-feature scaler mean and scale, one coefficient per feature, an
//! intercept, and an optional decision threshold. It is loaded once at
//! startup and shared read-only afterwards.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::info;

use crate::{
    errors::AdapterError,
    models::{Classification, FeatureVector, FEATURE_COUNT, FEATURE_NAMES},
    Classifier,
};

const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Deserialize)]
struct Artifact {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    threshold: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LogisticModel {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    threshold: f64,
}

impl LogisticModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let model = Self::from_json(&raw)?;
        info!("Model loaded from {}", path.display());
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self, AdapterError> {
        let artifact: Artifact = serde_json::from_str(raw)?;
        Self::from_artifact(artifact)
    }

    fn decision(&self, features: &FeatureVector) -> f64 {
        features
            .as_slice()
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .zip(self.coefficients.iter())
            .fold(self.intercept, |z, ((x, (mean, scale)), coef)| {
                z + coef * (x - mean) / scale
            })
    }

    fn from_artifact(artifact: Artifact) -> Result<Self, AdapterError> {
        if artifact.feature_names.len() != FEATURE_COUNT {
            return Err(AdapterError::Artifact(format!(
                "expected {FEATURE_COUNT} features, found {}",
                artifact.feature_names.len()
            )));
        }
        for (expected, found) in FEATURE_NAMES.iter().zip(&artifact.feature_names) {
            if expected != found {
                return Err(AdapterError::Artifact(format!(
                    "feature order mismatch: expected {expected}, found {found}"
                )));
            }
        }

        let mean = fixed("mean", &artifact.mean)?;
        let scale = fixed("scale", &artifact.scale)?;
        let coefficients = fixed("coefficients", &artifact.coefficients)?;

        if scale.iter().any(|s| *s == 0.0) {
            return Err(AdapterError::Artifact("scale contains zero".to_string()));
        }
        if !artifact.intercept.is_finite() {
            return Err(AdapterError::Artifact("intercept is not finite".to_string()));
        }

        let threshold = artifact.threshold.unwrap_or(DEFAULT_THRESHOLD);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AdapterError::Artifact(format!(
                "threshold {threshold} outside [0, 1]"
            )));
        }

        Ok(Self {
            mean,
            scale,
            coefficients,
            intercept: artifact.intercept,
            threshold,
        })
    }
}

fn fixed(field: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT], AdapterError> {
    let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        AdapterError::Artifact(format!(
            "{field}: expected {FEATURE_COUNT} values, found {}",
            values.len()
        ))
    })?;
    if array.iter().any(|v| !v.is_finite()) {
        return Err(AdapterError::Artifact(format!("{field} contains non-finite values")));
    }
    Ok(array)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<Classification, AdapterError> {
        if features.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(AdapterError::Inference("input contains non-finite values".to_string()));
        }

        let probability = sigmoid(self.decision(features));
        if !probability.is_finite() {
            return Err(AdapterError::Inference("probability is not finite".to_string()));
        }

        Ok(Classification {
            class: u8::from(probability >= self.threshold),
            probability,
        })
    }
}
