//! Global application error types and handlers.
//!
//! `AppError` is the single error type returned by every handler. It maps each
//! failure onto a status code and a `{"detail": ...}` body, which is the shape
//! the dashboard renders verbatim.

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use glucoscope_adapters::AdapterError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;

pub mod extract;

pub use extract::{AppForm, AppJson};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error("{public}")]
    Internal { public: String, cause: String },
}

impl AppError {
    pub fn internal(public: impl Into<String>, cause: impl ToString) -> Self {
        AppError::Internal {
            public: public.into(),
            cause: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::internal("Database error.", err)
    }
}

impl From<AdapterError> for AppError {
    fn from(err: AdapterError) -> Self {
        AppError::internal("Internal Server Error.", err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Internal { cause, .. } = &self {
            error!("{self}: {cause}");
        }

        let mut response = (status, Json(json!({ "detail": self.to_string() }))).into_response();

        if let AppError::Unauthorized(_) = self {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
