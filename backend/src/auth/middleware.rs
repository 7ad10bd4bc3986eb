//! Middleware for protecting authenticated routes.
//!
//! `AuthUser` is an extractor: any handler that takes it as an argument only
//! runs once the request's bearer token has been verified and its subject
//! resolved to a stored user. This is the only authorization check; there
//! are no roles or scopes.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::errors::AuthError;
use crate::{
    database::models::UserRecord, errors::AppError, services::AccountService, state::SharedState,
};

/// The user behind a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserRecord);

#[async_trait]
impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let user = resolve(&state.accounts, token).await?;
        Ok(AuthUser(user))
    }
}

/// Resolves a bearer token to its user. A token whose subject has since been
/// deleted is rejected like any other invalid token.
pub async fn resolve(accounts: &AccountService, token: &str) -> Result<UserRecord, AppError> {
    let subject = accounts.tokens().verify(token).map_err(AuthError::from)?;
    accounts.resolve_subject(&subject).await
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn rejects_missing_or_foreign_scheme() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(&headers("Bearer ")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(&headers("abc")), Err(AuthError::MissingToken));
    }
}
