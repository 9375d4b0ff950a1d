//! Vendor Database Module
//!
//! Read-only access to the authenticator's keychain-style SQLite store.

pub mod connection;
pub mod queries;
pub mod records;

use std::path::PathBuf;

use thiserror::Error;

/// Database errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database not found: {0}")]
    NotFound(PathBuf),
}

pub type DbResult<T> = Result<T, DbError>;

// Re-exports
pub use connection::{ExtractorConfig, KeychainDb};
pub use queries::fetch_accounts;
pub use records::{AccountRecord, DeclaredOtp, SECRET_FIELDS};
