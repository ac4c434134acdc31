//! HMAC-SHA256 tags over raw payload bytes.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::AuthError;

type HmacSha256 = Hmac<Sha256>;

pub const TAG_LEN: usize = 32;

pub type Tag = [u8; TAG_LEN];

/// Compute the keyed tag of `message` under `secret`.
///
/// # Errors
/// Returns `ConfigurationMissing` when `secret` is empty.
pub fn sign(secret: &[u8], message: &[u8]) -> Result<Tag, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::ConfigurationMissing);
    }

    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| AuthError::ConfigurationMissing)?;
    mac.update(message);

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_is_deterministic() {
        assert_eq!(sign(b"secret", b"message"), sign(b"secret", b"message"));
    }

    #[test]
    fn sign_matches_rfc4231_case_2() {
        // RFC 4231 test case 2: key "Jefe"
        let tag = sign(b"Jefe", b"what do ya want for nothing?").ok();
        let expected: Tag = [
            0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95,
            0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9,
            0x64, 0xec, 0x38, 0x43,
        ];
        assert_eq!(tag, Some(expected));
    }

    #[test]
    fn single_bit_changes_tag() {
        let base = sign(b"secret", b"1700000000000");
        assert_ne!(base, sign(b"secret", b"1700000000001"));
        assert_ne!(base, sign(b"secreu", b"1700000000000"));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert_eq!(sign(b"", b"message"), Err(AuthError::ConfigurationMissing));
    }
}
