//! Secret Decoding
//!
//! Proposes byte-string interpretations of an opaque stored token.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::Encoding;

/// One hypothesized interpretation of a stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub bytes: Vec<u8>,
    pub encoding: Encoding,
}

/// Decode a token under every plausible encoding, in a fixed order:
/// Hex, Base32, Base64, Raw.
///
/// The storage format's encoding convention is unknown and possibly
/// inconsistent across schema versions, so every attempt runs independently
/// and failures are dropped without aborting the rest. The literal UTF-8
/// bytes are always appended last. An empty token yields no candidates.
pub fn decode(token: &str) -> Vec<Candidate> {
    if token.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::with_capacity(4);
    if let Some(bytes) = try_hex(token) {
        candidates.push(Candidate { bytes, encoding: Encoding::Hex });
    }
    if let Some(bytes) = try_base32(token) {
        candidates.push(Candidate { bytes, encoding: Encoding::Base32 });
    }
    if let Some(bytes) = try_base64(token) {
        candidates.push(Candidate { bytes, encoding: Encoding::Base64 });
    }
    candidates.push(Candidate {
        bytes: token.as_bytes().to_vec(),
        encoding: Encoding::Raw,
    });
    candidates
}

/// Pairs of hex digits; rejects odd lengths and any non-hex character.
fn try_hex(token: &str) -> Option<Vec<u8>> {
    hex::decode(token).ok()
}

/// RFC 4648 Base32, case-insensitively, padded out to a multiple of 8.
fn try_base32(token: &str) -> Option<Vec<u8>> {
    let mut padded = token.to_ascii_uppercase();
    let rem = padded.len() % 8;
    if rem != 0 {
        for _ in 0..(8 - rem) {
            padded.push('=');
        }
    }
    if !padded
        .bytes()
        .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b) || b == b'=')
    {
        return None;
    }
    base32::decode(base32::Alphabet::Rfc4648 { padding: true }, &padded)
}

/// Standard Base64, padded out to a multiple of 4.
fn try_base64(token: &str) -> Option<Vec<u8>> {
    let mut padded = token.to_string();
    let rem = padded.len() % 4;
    if rem != 0 {
        for _ in 0..(4 - rem) {
            padded.push('=');
        }
    }
    BASE64.decode(padded.as_bytes()).ok()
}
