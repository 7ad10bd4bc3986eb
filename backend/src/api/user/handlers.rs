//! Handler functions for user profile and management API endpoints.
//!
//! Every handler here is guarded by `AuthUser` and acts only on the caller's
//! own record.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthUser, UserResponse},
    errors::{AppError, AppJson},
    state::SharedState,
};

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub info: Option<String>,
}

pub async fn update_user(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let updated = state
        .accounts
        .update_profile(&user, &payload.username, &payload.email)
        .await?;

    Ok(Json(UserResponse::from(&updated)))
}

pub async fn update_password(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts
        .change_password(&user, &payload.old_password, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully!".to_string(),
        info: None,
    }))
}

pub async fn delete_account(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<DeleteUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.accounts.delete_account(&user, &payload.password).await?;

    Ok(Json(MessageResponse {
        message: "Account deleted successfully!".to_string(),
        info: Some("You will need to register again to access the system.".to_string()),
    }))
}
