//! Glucoscope: an authenticated HTTP API around a pre-trained diabetes
//! classifier.
//!
//! The crate wires together the credential store (`database`), bearer token
//! authentication (`auth`), account management and prediction (`services`),
//! and the HTTP surface (`api`). `main.rs` only loads configuration and
//! serves the router built by [`app`].

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use state::SharedState;

pub fn app(state: SharedState) -> Router {
    let router = Router::new()
        .route("/", get(root_handler))
        .merge(auth::auth_router())
        .merge(api::diabetes::diabetes_router())
        .nest("/users", api::user::user_router())
        .with_state(state);

    middleware::apply(router)
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Diabetes Prediction API is running!" }))
}
