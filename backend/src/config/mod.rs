//! Central module for application-wide configuration settings.
//!
//! This module loads the listen address, database URL, token signing secret,
//! model artifact path, and text-generation endpoint credentials from the
//! environment. Secrets may also be read from files (e.g. Docker secrets).
//! The resulting `Config` is passed explicitly to whatever needs it.

use std::{env, fmt, fs::read_to_string, str::FromStr};

use thiserror::Error;
use tracing::info;

use crate::auth::{DEFAULT_TOKEN_TTL_MINUTES, MAX_TOKEN_TTL_MINUTES};

pub const DEFAULT_ADVICE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },

    #[error("Failed to read {key} from {path}: {source}")]
    SecretFile {
        key: String,
        path: String,
        source: std::io::Error,
    },
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub model_path: String,
    pub advice_api_url: String,
    pub advice_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_ttl_minutes: i64 = try_load(
            &lookup,
            "GLUCOSCOPE_TOKEN_TTL_MINUTES",
            &DEFAULT_TOKEN_TTL_MINUTES.to_string(),
        )?;
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&token_ttl_minutes) {
            return Err(ConfigError::Invalid {
                key: "GLUCOSCOPE_TOKEN_TTL_MINUTES".to_string(),
                reason: format!("must be between 1 and {MAX_TOKEN_TTL_MINUTES}"),
            });
        }

        Ok(Self {
            host: try_load(&lookup, "GLUCOSCOPE_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "GLUCOSCOPE_PORT", "8000")?,
            database_url: try_load(&lookup, "DATABASE_URL", "sqlite://diabetes.db?mode=rwc")?,
            jwt_secret: read_secret(&lookup, "GLUCOSCOPE_JWT_SECRET")?,
            token_ttl_minutes,
            model_path: try_load(&lookup, "GLUCOSCOPE_MODEL_PATH", "diabetes_model.json")?,
            advice_api_url: try_load(&lookup, "GLUCOSCOPE_ADVICE_URL", DEFAULT_ADVICE_URL)?,
            advice_api_key: read_secret(&lookup, "GLUCOSCOPE_ADVICE_API_KEY")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("model_path", &self.model_path)
            .field("advice_api_url", &self.advice_api_url)
            .field("advice_api_key", &"<redacted>")
            .finish()
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Reads `KEY` directly, or the file named by `KEY_FILE`.
fn read_secret<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file_key = format!("{key}_FILE");

    let secret = match (lookup(key), lookup(&file_key)) {
        (Some(value), _) => value,
        (None, Some(path)) => read_to_string(&path)
            .map_err(|source| ConfigError::SecretFile {
                key: key.to_string(),
                path: path.clone(),
                source,
            })?,
        (None, None) => return Err(ConfigError::Missing(key.to_string())),
    };

    let secret = secret.trim().to_string();
    if secret.is_empty() {
        return Err(ConfigError::Invalid {
            key: key.to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(secret)
}
