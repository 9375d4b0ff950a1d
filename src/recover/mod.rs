//! Secret Recovery Engine
//!
//! Decodes opaque stored tokens under several candidate encodings and
//! cross-checks each interpretation against a fixed parameter matrix.

pub mod decoder;
pub mod evaluator;

use std::fmt;

use serde::{Serialize, Serializer};

/// Hypothesized encoding of a stored secret token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Hex,
    Base32,
    Base64,
    Raw,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hex => "Hex",
            Self::Base32 => "Base32",
            Self::Base64 => "Base64",
            Self::Raw => "Raw",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Re-exports
pub use decoder::{decode, Candidate};
pub use evaluator::{evaluate, CodeResult, GenParams, PARAMETER_MATRIX, PERIOD};
