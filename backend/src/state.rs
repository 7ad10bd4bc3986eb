use std::sync::Arc;

use glucoscope_adapters::{Classifier, HuggingFaceClient, LogisticModel, TextGenerator};
use sqlx::SqlitePool;

use crate::{
    auth::{PasswordService, TokenService},
    config::Config,
    database,
    services::{AccountService, AdviceRelay, PredictionService},
};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub accounts: AccountService,
    pub predictions: PredictionService,
    pub advice: AdviceRelay,
}

impl AppState {
    /// Wires production collaborators from configuration.
    pub async fn from_config(config: &Config) -> Result<SharedState, StartupError> {
        let pool = database::connect(&config.database_url).await?;
        let classifier: Arc<dyn Classifier> = Arc::new(LogisticModel::load(&config.model_path)?);
        let generator: Arc<dyn TextGenerator> = Arc::new(HuggingFaceClient::new(
            config.advice_api_url.clone(),
            config.advice_api_key.clone(),
        )?);

        Ok(Self::new(
            pool,
            PasswordService::default(),
            TokenService::new(&config.jwt_secret, config.token_ttl_minutes),
            classifier,
            generator,
        ))
    }

    pub fn new(
        pool: SqlitePool,
        passwords: PasswordService,
        tokens: TokenService,
        classifier: Arc<dyn Classifier>,
        generator: Arc<dyn TextGenerator>,
    ) -> SharedState {
        Arc::new(Self {
            accounts: AccountService::new(pool, passwords, tokens),
            predictions: PredictionService::new(classifier),
            advice: AdviceRelay::new(generator),
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("Database initialization failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Adapter(#[from] glucoscope_adapters::AdapterError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
