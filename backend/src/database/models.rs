//! Rust structs that represent database table mappings.
//!
//! `UserRecord` is the full row, password hash included. API responses use
//! the views in `auth::models` instead.

use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
