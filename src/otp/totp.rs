//! TOTP Generation
//!
//! RFC 6238 time-based codes layered on the HOTP generator.

use super::{hotp, Code, HashAlgorithm};

/// Generate an RFC 6238 TOTP code for a given instant.
///
/// `now` is wall-clock seconds since the UNIX epoch, supplied by the caller
/// so the generator stays a pure function. The declared `algorithm` name is
/// resolved through [`HashAlgorithm::from_name`] and may be anything.
pub fn totp(
    secret: &[u8],
    digits: u32,
    period: u64,
    algorithm: &str,
    time_offset: i64,
    now: u64,
) -> Code {
    // Malformed records routinely carry empty secrets; a code computed from
    // zero-length input would be indistinguishable from a real one.
    if secret.is_empty() {
        return Code::EmptySecret;
    }
    if period == 0 {
        return Code::Internal;
    }

    let shifted = now as i64 + time_offset;
    let counter = if shifted <= 0 {
        0
    } else {
        shifted as u64 / period
    };
    hotp(secret, counter, digits, HashAlgorithm::from_name(algorithm))
}

/// Seconds until the current period rolls over.
pub fn time_remaining(period: u64, now: u64) -> u64 {
    if period == 0 {
        return 0;
    }
    period - now % period
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_20: &[u8] = b"12345678901234567890";
    const SECRET_32: &[u8] = b"12345678901234567890123456789012";
    const SECRET_64: &[u8] =
        b"1234567890123456789012345678901234567890123456789012345678901234";

    #[test]
    fn test_rfc6238_appendix_b_at_59() {
        assert_eq!(
            totp(SECRET_20, 8, 30, "SHA1", 0, 59),
            Code::Digits("94287082".to_string())
        );
        assert_eq!(
            totp(SECRET_32, 8, 30, "SHA256", 0, 59),
            Code::Digits("46119246".to_string())
        );
        assert_eq!(
            totp(SECRET_64, 8, 30, "SHA512", 0, 59),
            Code::Digits("90693936".to_string())
        );
    }

    #[test]
    fn test_now_59_matches_hotp_counter_1() {
        // floor(59 / 30) = 1, so this is the RFC 4226 vector for counter 1.
        assert_eq!(
            totp(SECRET_20, 6, 30, "SHA1", 0, 59),
            Code::Digits("287082".to_string())
        );
    }

    #[test]
    fn test_pure_within_a_window() {
        let a = totp(SECRET_20, 6, 30, "SHA1", 0, 1_700_000_007);
        let b = totp(SECRET_20, 6, 30, "SHA1", 0, 1_700_000_007);
        assert_eq!(a, b);
    }

    #[test]
    fn test_offset_shifts_the_counter() {
        // 59 - 30 lands in the counter-0 window.
        assert_eq!(
            totp(SECRET_20, 6, 30, "SHA1", -30, 59),
            Code::Digits("755224".to_string())
        );
        // 59 + 30 lands in the counter-2 window.
        assert_eq!(
            totp(SECRET_20, 6, 30, "SHA1", 30, 59),
            Code::Digits("359152".to_string())
        );
    }

    #[test]
    fn test_offset_before_epoch_clamps_to_counter_zero() {
        assert_eq!(
            totp(SECRET_20, 6, 30, "SHA1", -120, 59),
            Code::Digits("755224".to_string())
        );
    }

    #[test]
    fn test_empty_secret_sentinel() {
        let code = totp(b"", 6, 30, "SHA1", 0, 59);
        assert_eq!(code, Code::EmptySecret);
        assert_eq!(code.to_string(), "EMPTY");
    }

    #[test]
    fn test_zero_period_does_not_panic() {
        assert_eq!(totp(SECRET_20, 6, 0, "SHA1", 0, 59), Code::Internal);
    }

    #[test]
    fn test_unknown_algorithm_defaults_to_sha1() {
        assert_eq!(
            totp(SECRET_20, 6, 30, "whatever", 0, 59),
            totp(SECRET_20, 6, 30, "SHA1", 0, 59)
        );
    }

    #[test]
    fn test_time_remaining() {
        assert_eq!(time_remaining(30, 59), 1);
        assert_eq!(time_remaining(30, 60), 30);
        assert_eq!(time_remaining(0, 60), 0);
    }
}
