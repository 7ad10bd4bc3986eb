//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the API domains beyond core
//! authentication: self-service user management and diabetes prediction.

pub mod diabetes;
pub mod user;
