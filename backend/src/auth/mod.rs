//! Authentication module for managing user accounts, sessions, and access control.
//!
//! This module provides the public interface for authentication: password
//! hashing, bearer token issuance and verification, the `AuthUser` extractor
//! that guards protected routes, and the register/login/profile endpoints.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use middleware::AuthUser;
pub use models::*;
pub use routes::auth_router;
pub use service::*;
