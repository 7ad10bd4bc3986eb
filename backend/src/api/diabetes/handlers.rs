//! Handler functions for the diabetes prediction API.
//!
//! These functions validate the request, call the `PredictionService` or the
//! `AdviceRelay`, and format the responses for the dashboard.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    auth::AuthUser,
    errors::{AppError, AppJson},
    services::{DiabetesInput, HealthSummary},
    state::SharedState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    pub probability: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub advice: String,
}

pub async fn predict(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    AppJson(input): AppJson<DiabetesInput>,
) -> Result<Json<PredictionResponse>, AppError> {
    let prediction = state.predictions.predict(&input)?;

    info!(
        "User '{}' - Prediction: {} (Probability: {:.2})",
        user.username, prediction.label, prediction.probability
    );

    Ok(Json(PredictionResponse {
        prediction: prediction.label.to_string(),
        probability: prediction.probability_percent(),
        message: format!("Hello, {}! {}", user.username, prediction.advice),
    }))
}

pub async fn chat(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    AppJson(summary): AppJson<HealthSummary>,
) -> Result<Json<ChatResponse>, AppError> {
    let advice = state.advice.relay(&user.username, &summary).await?;
    Ok(Json(ChatResponse { advice }))
}
