//! Defines the HTTP routes for prediction and advice.

use axum::{routing::post, Router};

use super::handlers::{chat, predict};
use crate::state::SharedState;

pub fn diabetes_router() -> Router<SharedState> {
    Router::new()
        .route("/predict", post(predict))
        .route("/chat", post(chat))
}
