//! Custom error types specific to authentication failures.
//!
//! Every variant surfaces as 401. The messages deliberately stay coarse: a
//! bad password and an unknown username look the same, and token failures
//! never reveal which check failed.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User is not present in the database")]
    UnknownUser,
}

/// Returned by token verification regardless of the underlying cause.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid token")]
pub struct TokenError;

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        AuthError::InvalidToken
    }
}

#[derive(Error, Debug)]
pub enum IssueError {
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,

    #[error(transparent)]
    Encode(#[from] jsonwebtoken::errors::Error),
}
