//! Digest Selection
//!
//! Maps declared algorithm names onto concrete hash functions.

use serde::Serialize;

/// Hash function used inside the HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Resolve a declared algorithm name, case-insensitively.
    ///
    /// Stored metadata cannot be trusted, so anything unrecognized (including
    /// an empty name) degrades to SHA-1 rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "SHA256" => Self::Sha256,
            "SHA512" => Self::Sha512,
            _ => Self::Sha1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}
