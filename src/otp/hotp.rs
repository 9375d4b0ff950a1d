//! HOTP Generation
//!
//! RFC 4226 counter-based codes with dynamic truncation.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use super::{Code, HashAlgorithm};

/// Generate an RFC 4226 HOTP code.
///
/// An empty secret is a valid HMAC key and produces a real code; empty-secret
/// handling lives one layer up in [`super::totp`]. Defensive failures come
/// back as [`Code::Internal`] so one bad candidate cannot abort a batch.
pub fn hotp(secret: &[u8], counter: u64, digits: u32, algorithm: HashAlgorithm) -> Code {
    let message = counter.to_be_bytes();
    let Some(hash) = hmac_bytes(algorithm, secret, &message) else {
        return Code::Internal;
    };

    // Dynamic truncation: low 4 bits of the last byte pick the 31-bit word.
    let Some(&last) = hash.last() else {
        return Code::Internal;
    };
    let offset = (last & 0x0f) as usize;
    let Some(chunk) = hash.get(offset..offset + 4) else {
        return Code::Internal;
    };
    let word = [chunk[0], chunk[1], chunk[2], chunk[3]];
    let binary = u64::from(u32::from_be_bytes(word) & 0x7fff_ffff);

    let code = match 10u64.checked_pow(digits) {
        Some(modulus) => binary % modulus,
        // Past 19 digits the modulus exceeds the truncated value anyway.
        None => binary,
    };
    Code::Digits(format!("{:0width$}", code, width = digits as usize))
}

fn hmac_bytes(algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Option<Vec<u8>> {
    match algorithm {
        HashAlgorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).ok()?;
            mac.update(message);
            Some(mac.finalize().into_bytes().to_vec())
        }
        HashAlgorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).ok()?;
            mac.update(message);
            Some(mac.finalize().into_bytes().to_vec())
        }
        HashAlgorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).ok()?;
            mac.update(message);
            Some(mac.finalize().into_bytes().to_vec())
        }
    }
}
