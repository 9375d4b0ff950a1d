//! Candidate Evaluation
//!
//! Cross-products decoded candidates against a fixed parameter matrix.

use serde::Serialize;

use crate::otp::{totp, Code};

use super::{decode, Encoding};

/// TOTP period used throughout the evaluation matrix.
pub const PERIOD: u64 = 30;

/// One cell of the parameter matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenParams {
    pub digits: u32,
    pub algorithm: &'static str,
    pub time_offset: i64,
}

impl GenParams {
    /// Short human label, e.g. `6d/SHA1/-30s`.
    pub fn label(&self) -> String {
        if self.time_offset == 0 {
            format!("{}d/{}", self.digits, self.algorithm)
        } else {
            format!("{}d/{}/{:+}s", self.digits, self.algorithm, self.time_offset)
        }
    }
}

/// The fixed matrix evaluated for every decoded candidate: the conventional
/// parameters, a digit-count variant, an algorithm variant, and one period of
/// time drift either way. Declared metadata never narrows this down, since
/// cross-checking declared against actual parameters is the whole point.
pub const PARAMETER_MATRIX: [GenParams; 5] = [
    GenParams { digits: 6, algorithm: "SHA1", time_offset: 0 },
    GenParams { digits: 8, algorithm: "SHA1", time_offset: 0 },
    GenParams { digits: 6, algorithm: "SHA256", time_offset: 0 },
    GenParams { digits: 6, algorithm: "SHA1", time_offset: -(PERIOD as i64) },
    GenParams { digits: 6, algorithm: "SHA1", time_offset: PERIOD as i64 },
];

/// One generated code, labeled with everything that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct CodeResult {
    pub account: String,
    pub field: String,
    pub encoding: Encoding,
    pub byte_len: usize,
    pub params: GenParams,
    pub code: Code,
}

/// Evaluate every decoding of one stored token against the full matrix.
///
/// Pure in `now`; recomputed on every call so codes always reflect the live
/// window. Candidates that decoded to zero bytes are skipped (the empty-secret
/// sentinel belongs to genuinely empty records, not to decoding artifacts).
pub fn evaluate(account: &str, field: &str, token: &str, now: u64) -> Vec<CodeResult> {
    let mut results = Vec::new();
    for candidate in decode(token) {
        if candidate.bytes.is_empty() {
            continue;
        }
        for params in PARAMETER_MATRIX {
            let code = totp(
                &candidate.bytes,
                params.digits,
                PERIOD,
                params.algorithm,
                params.time_offset,
                now,
            );
            results.push(CodeResult {
                account: account.to_string(),
                field: field.to_string(),
                encoding: candidate.encoding,
                byte_len: candidate.bytes.len(),
                params,
                code,
            });
        }
    }
    results
}
