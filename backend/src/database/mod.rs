//! Module for database connection setup and common utilities.
//!
//! This module initializes the SQLite connection pool and creates the
//! `users` table. Identity and email uniqueness is enforced by the table
//! itself so concurrent registrations cannot slip past the application-level
//! checks.

pub mod models;
pub mod queries;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT    NOT NULL UNIQUE,
    email         TEXT    NOT NULL UNIQUE,
    password_hash TEXT    NOT NULL
)
"#;

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqlitePoolOptions::new();

    // An in-memory database lives only as long as its connection.
    let options = if database_url.contains(":memory:") {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options.max_connections(5)
    };

    let pool = options.connect(database_url).await?;
    migrate(&pool).await?;

    info!("Database ready at {database_url}");
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}
