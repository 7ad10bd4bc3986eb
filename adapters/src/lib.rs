//! Core `adapters` crate for abstracting the service's external collaborators.
//!
//! This crate defines the `Classifier` trait, which wraps a pre-fitted model
//! behind a narrow `predict` capability, and the `TextGenerator` trait, which
//! wraps a remote text-generation endpoint. It also provides the concrete
//! implementations used in production (`LogisticModel`, `HuggingFaceClient`).

pub mod errors;
pub mod huggingface;
pub mod logistic;
pub mod models;

use async_trait::async_trait;

pub use errors::AdapterError;
pub use huggingface::HuggingFaceClient;
pub use logistic::LogisticModel;
pub use models::{Classification, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// A pre-fitted binary classifier.
///
/// Implementations must be deterministic for a fixed artifact so results can
/// be pinned in tests.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Classification, AdapterError>;
}

/// A remote service that completes a text prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AdapterError>;
}
