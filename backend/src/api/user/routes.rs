//! Defines the HTTP routes mounted under `/users`.

use axum::{
    routing::{delete, get, put},
    Router,
};

use super::handlers::{delete_account, update_password, update_user};
use crate::{auth::handlers::profile, state::SharedState};

pub fn user_router() -> Router<SharedState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/update", put(update_user))
        .route("/update-password", put(update_password))
        .route("/delete", delete(delete_account))
}
