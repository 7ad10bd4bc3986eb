//! Module for user profile and management API endpoints.
//!
//! This module handles functionality related to a signed-in user's own
//! record that is distinct from the core authentication process: reading the
//! profile, changing identity and email, changing the password, and deleting
//! the account.

pub mod handlers;
pub mod routes;

pub use routes::user_router;
