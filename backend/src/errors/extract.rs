//! Body extractors whose rejections flow through `AppError`, so malformed or
//! incomplete payloads get the same `{"detail"}` body as every other failure.

use axum::extract::FromRequest;

use super::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct AppForm<T>(pub T);
