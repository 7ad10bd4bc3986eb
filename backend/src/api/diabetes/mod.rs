//! Module for the diabetes prediction API.
//!
//! This module exposes the classifier and the advice chatbot to signed-in
//! users over HTTP.

pub mod handlers;
pub mod routes;

pub use routes::diabetes_router;
