//! Relay between the chat endpoint and the external text-generation service.
//!
//! A health summary is rendered into a prompt, forwarded to the injected
//! `TextGenerator`, and the reply is reshaped into plain advice text.

use std::sync::Arc;

use glucoscope_adapters::TextGenerator;
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;

const RELAY_FAILED: &str = "Chatbot service error.";

#[derive(Debug, Clone, Deserialize)]
pub struct HealthSummary {
    pub glucose: f64,
    pub blood_pressure: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub age: u32,
    pub diabetes_pedigree_function: f64,
    pub prediction: String,
    pub probability: String,
}

pub fn render_prompt(username: &str, summary: &HealthSummary) -> String {
    format!(
        "User {username} has a {prediction} diabetes risk with a probability of {probability}.\n\
         Health details:\n\
         - Glucose: {glucose}\n\
         - Blood Pressure: {blood_pressure}\n\
         - Insulin: {insulin}\n\
         - BMI: {bmi}\n\
         - Age: {age}\n\
         - Diabetes Pedigree Function: {dpf}\n\
         Provide **concise** health recommendations for diabetes prevention and management \
         in **bullet points** (avoid unnecessary introductions).",
        prediction = summary.prediction,
        probability = summary.probability,
        glucose = summary.glucose,
        blood_pressure = summary.blood_pressure,
        insulin = summary.insulin,
        bmi = summary.bmi,
        age = summary.age,
        dpf = summary.diabetes_pedigree_function,
    )
}

/// Strips an echoed prompt, trims every line, and drops surrounding blank lines.
pub fn extract_advice(prompt: &str, generated: &str) -> String {
    let completion = generated.strip_prefix(prompt).unwrap_or(generated);

    let lines: Vec<&str> = completion.lines().map(str::trim).collect();
    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[derive(Clone)]
pub struct AdviceRelay {
    generator: Arc<dyn TextGenerator>,
}

impl AdviceRelay {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn relay(&self, username: &str, summary: &HealthSummary) -> Result<String, AppError> {
        let prompt = render_prompt(username, summary);

        let generated = self.generator.generate(&prompt).await.map_err(|err| {
            error!("Chatbot error: {err}");
            AppError::internal(RELAY_FAILED, err)
        })?;

        let advice = extract_advice(&prompt, &generated);
        info!("Advice generated for user {username} ({} chars)", advice.len());
        Ok(advice)
    }
}
