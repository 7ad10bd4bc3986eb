//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse registration and login payloads, delegate to the
//! `AccountService`, and shape the responses. The profile handler is shared
//! with the `/users` router.

use axum::{extract::State, http::StatusCode, Json};

use super::{
    middleware::AuthUser,
    models::{LoginForm, ProfileResponse, RegisterRequest, TokenResponse, UserResponse},
};
use crate::{
    errors::{AppError, AppForm, AppJson},
    state::SharedState,
};

pub async fn register(
    State(state): State<SharedState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .accounts
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

pub async fn login(
    State(state): State<SharedState>,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.accounts.login(&form.username, &form.password).await?;
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn profile(AuthUser(user): AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(&user))
}
