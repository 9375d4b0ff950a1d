//! One-Time Password Generation
//!
//! RFC 4226 (HOTP) and RFC 6238 (TOTP) code generation.

pub mod digest;
pub mod hotp;
pub mod totp;

use std::fmt;

use serde::{Serialize, Serializer};

/// Outcome of a single code generation.
///
/// Sentinel variants are rendered inline by the presentation layer, so a
/// malformed record never aborts evaluation of the remaining candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    /// A valid zero-padded decimal code.
    Digits(String),
    /// The secret was empty after decoding.
    EmptySecret,
    /// The HMAC computation failed (should not occur with typed inputs).
    Internal,
}

impl Code {
    pub fn is_code(&self) -> bool {
        matches!(self, Self::Digits(_))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digits(code) => f.write_str(code),
            Self::EmptySecret => f.write_str("EMPTY"),
            Self::Internal => f.write_str("ERROR"),
        }
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Re-exports
pub use digest::HashAlgorithm;
pub use hotp::hotp;
pub use totp::{time_remaining, totp};
