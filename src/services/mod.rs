// Service exports
pub mod auth;
pub mod postgres;

pub use auth::{AuthService, AuthError, Claims, hash_password, verify_password};
pub use postgres::{PostgresClient, PostgresError, NewAccount};
