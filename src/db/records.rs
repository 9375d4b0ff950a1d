//! Account Records
//!
//! Field extraction from the authenticator's stored JSON blobs.

use serde::Serialize;
use serde_json::Value;

/// Field names observed to hold secret material, probed in order. The schema
/// is undocumented and has drifted across versions, so every plausible field
/// is carried forward for evaluation.
pub const SECRET_FIELDS: [&str; 6] = [
    "otpSecretKeyNew",
    "otpSecretKey",
    "akey",
    "pkey",
    "secret",
    "otpSecret",
];

/// OTP metadata the record declares about itself. Advisory only: the whole
/// point of the tool is cross-checking declared against actual parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeclaredOtp {
    pub otp_type: Option<String>,
    pub digits: Option<u32>,
    pub period: Option<u64>,
    pub algorithm: Option<String>,
}

impl DeclaredOtp {
    /// One-line summary with the conventional defaults filled in.
    pub fn describe(&self) -> String {
        format!(
            "Type: {} | Digits: {} | Period: {} | Algo: {}",
            self.otp_type.as_deref().unwrap_or("?"),
            self.digits.unwrap_or(6),
            self.period.unwrap_or(30),
            self.algorithm.as_deref().unwrap_or("SHA1"),
        )
    }
}

/// One account pulled from the vendor store.
#[derive(Debug, Clone, Serialize)]
pub struct AccountRecord {
    /// Display name, falling back through the known name fields.
    pub name: String,
    /// Non-empty secret tokens, as (field name, raw text) in probe order.
    pub tokens: Vec<(String, String)>,
    pub declared: DeclaredOtp,
}

impl AccountRecord {
    /// Parse one stored JSON blob. Returns `None` for anything that is not a
    /// JSON object; a bad row is skipped, never fatal.
    pub fn from_json(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let obj = value.as_object()?;

        let name = str_field(obj, "displayLabel")
            .or_else(|| str_field(obj, "accountName"))
            .unwrap_or_else(|| "Unknown".to_string());

        let tokens = SECRET_FIELDS
            .iter()
            .filter_map(|field| {
                str_field(obj, field)
                    .filter(|token| !token.is_empty())
                    .map(|token| (field.to_string(), token))
            })
            .collect();

        let declared = DeclaredOtp {
            otp_type: str_field(obj, "otpType"),
            digits: obj.get("otpDigits").and_then(Value::as_u64).map(|d| d as u32),
            period: obj.get("otpPeriod").and_then(Value::as_u64),
            algorithm: str_field(obj, "otpAlgorithm"),
        };

        Some(Self { name, tokens, declared })
    }

    /// The token the vendor app itself generates from, when present.
    pub fn primary_token(&self) -> Option<&str> {
        self.tokens.first().map(|(_, token)| token.as_str())
    }
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
