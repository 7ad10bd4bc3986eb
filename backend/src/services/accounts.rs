//! Account operations: registration, login, and the mutations a signed-in
//! user may perform on their own record.
//!
//! Each operation is a single statement against the credential store. The
//! store's UNIQUE constraints back the application-level conflict checks.

use sqlx::SqlitePool;
use tracing::info;

use crate::{
    auth::{AuthError, PasswordService, TokenService},
    database::{models::UserRecord, queries},
    errors::AppError,
};

const USERNAME_TAKEN: &str = "Username already exists!";
const EMAIL_REGISTERED: &str = "Email is already registered!";
const EMAIL_IN_USE: &str = "Email already in use.";

const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(pool: SqlitePool, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            pool,
            passwords,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AppError> {
        validate_username(username)?;
        validate_email(email)?;
        validate_password("password", password)?;

        if queries::find_by_username(&self.pool, username).await?.is_some() {
            return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
        }
        if queries::find_by_email(&self.pool, email).await?.is_some() {
            return Err(AppError::Conflict(EMAIL_REGISTERED.to_string()));
        }

        let hash = self.hash(password)?;
        let user = queries::insert_user(&self.pool, username, email, &hash)
            .await
            .map_err(|err| conflict_or(err, USERNAME_TAKEN))?;

        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Unknown usernames and wrong passwords fail identically, and both pay
    /// for one password verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = match queries::find_by_username(&self.pool, username).await? {
            Some(user) if self.passwords.verify(password, &user.password_hash) => user,
            Some(_) => return Err(AuthError::InvalidCredentials.into()),
            None => {
                self.passwords.verify_absent(password);
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        self.tokens
            .issue(&user.username)
            .map_err(|err| AppError::internal("Could not issue token.", err))
    }

    /// Resolves a verified token subject to its stored record.
    pub async fn resolve_subject(&self, subject: &str) -> Result<UserRecord, AppError> {
        queries::find_by_username(&self.pool, subject)
            .await?
            .ok_or_else(|| AuthError::UnknownUser.into())
    }

    pub async fn update_profile(
        &self,
        user: &UserRecord,
        username: &str,
        email: &str,
    ) -> Result<UserRecord, AppError> {
        validate_username(username)?;
        validate_email(email)?;

        if queries::email_taken_by_other(&self.pool, email, user.id).await? {
            return Err(AppError::Conflict(EMAIL_IN_USE.to_string()));
        }
        if queries::username_taken_by_other(&self.pool, username, user.id).await? {
            return Err(AppError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let updated = queries::update_profile(&self.pool, user.id, username, email)
            .await
            .map_err(|err| conflict_or(err, EMAIL_IN_USE))?
            .ok_or(AuthError::UnknownUser)?;

        info!("Updated profile of user {} -> {}", user.username, updated.username);
        Ok(updated)
    }

    pub async fn change_password(
        &self,
        user: &UserRecord,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        validate_password("old_password", old_password)?;
        validate_password("new_password", new_password)?;

        if !self.passwords.verify(old_password, &user.password_hash) {
            return Err(AppError::BadRequest("Incorrect old password.".to_string()));
        }

        let hash = self.hash(new_password)?;
        if !queries::update_password_hash(&self.pool, user.id, &hash).await? {
            return Err(AuthError::UnknownUser.into());
        }

        info!("Password changed for user {}", user.username);
        Ok(())
    }

    pub async fn delete_account(&self, user: &UserRecord, password: &str) -> Result<(), AppError> {
        validate_password("password", password)?;

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(AppError::BadRequest("Incorrect password.".to_string()));
        }

        if !queries::delete_user(&self.pool, user.id).await? {
            return Err(AuthError::UnknownUser.into());
        }

        info!("Deleted user {}", user.username);
        Ok(())
    }

    fn hash(&self, password: &str) -> Result<String, AppError> {
        self.passwords
            .hash(password)
            .map_err(|err| AppError::internal("Could not hash password.", err))
    }
}

fn conflict_or(err: sqlx::Error, message: &str) -> AppError {
    if queries::is_unique_violation(&err) {
        AppError::Conflict(message.to_string())
    } else {
        err.into()
    }
}

fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(AppError::Validation(format!(
            "username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_password(field: &str, password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Structural check only: one `@`, a non-empty local part, and a dotted domain.
fn validate_email(email: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation("email is not a valid email address".to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty());

    if well_formed {
        Ok(())
    } else {
        Err(invalid())
    }
}
