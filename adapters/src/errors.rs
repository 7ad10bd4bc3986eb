//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while loading the model artifact,
//! running inference, or talking to the remote text-generation service,
//! providing a unified error type for every external collaborator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model artifact: {0}")]
    Artifact(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Text generation request failed: {0}")]
    Transport(String),

    #[error("Text generation service returned {status}: {body}")]
    Upstream { status: u16, body: String },
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Artifact(err.to_string())
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        AdapterError::Transport(err.to_string())
    }
}
