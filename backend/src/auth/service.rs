//! Core business logic for the authentication system.
//!
//! `TokenService` issues and verifies signed, time-limited bearer tokens and
//! `PasswordService` produces and checks salted Argon2id password hashes.
//! Both are built from explicit configuration and hold no global state.

use std::sync::{Arc, OnceLock};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm as Argon2Algorithm, Argon2, Params, Version,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use super::{
    errors::{IssueError, TokenError},
    models::Claims,
};

pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
/// One year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// `ttl_minutes` is clamped to `1..=MAX_TOKEN_TTL_MINUTES`.
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::minutes(ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES)),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, IssueError> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<String, IssueError> {
        let expiry = now
            .checked_add_signed(self.ttl)
            .ok_or(IssueError::ExpiryOutOfRange)?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Returns the embedded subject, or `TokenError` on any failure.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                debug!("Token rejected: {err}");
                TokenError
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            debug!("Token for {} expired at {}", claims.sub, claims.exp);
            return Err(TokenError);
        }

        Ok(claims.sub)
    }
}

const DECOY_PASSWORD: &str = "decoy-password";

#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    decoy_hash: Arc<OnceLock<String>>,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            decoy_hash: Arc::default(),
        }
    }
}

impl PasswordService {
    /// Custom Argon2id cost parameters (memory in KiB, iterations, lanes).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, argon2::Error> {
        let params = Params::new(m_cost, t_cost, p_cost, None)?;

        Ok(Self {
            argon2: Argon2::new(Argon2Algorithm::Argon2id, Version::V0x13, params),
            decoy_hash: Arc::default(),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                debug!("Stored password hash is unreadable: {err}");
                false
            }
        }
    }

    /// Spends the same Argon2 work as `verify` when there is no stored hash
    /// to check against. Always false.
    pub fn verify_absent(&self, password: &str) -> bool {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.hash(DECOY_PASSWORD).unwrap_or_default());
        self.verify(password, decoy);
        false
    }
}
