//! Module for core business logic services.
//!
//! This module encapsulates the services that perform the application's
//! operations: account management against the credential store, risk
//! prediction through the classifier, and advice generation through the
//! remote text-generation service.

pub mod accounts;
pub mod advice;
pub mod prediction;

pub use accounts::AccountService;
pub use advice::{AdviceRelay, HealthSummary};
pub use prediction::{DiabetesInput, Prediction, PredictionService};
