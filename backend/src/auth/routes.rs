//! Defines the HTTP routes specifically for authentication.
//!
//! Registration, login, and the profile lookup live at the root of the API.
//! The router is merged into the main Axum router in `lib.rs`.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{login, profile, register};
use crate::state::SharedState;

pub fn auth_router() -> Router<SharedState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
}
