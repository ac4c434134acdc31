//! Session credentials: `b64url(issued_at_millis) "." b64url(tag)`.

use std::fmt;
use tracing::debug;

use super::{AuthContext, AuthError, codec, compare, signer};

/// Sessions are accepted for 30 days after issuance. There is no sliding expiry.
pub const MAX_SESSION_AGE_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// `Max-Age` for the session cookie, matching [`MAX_SESSION_AGE_MS`].
pub const MAX_SESSION_AGE_SECONDS: i64 = MAX_SESSION_AGE_MS / 1000;

/// A signed, self-contained bearer value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Outcome of [`verify`]. Carries no failure reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub valid: bool,
    pub issued_at: Option<i64>,
}

impl Verification {
    const INVALID: Self = Self {
        valid: false,
        issued_at: None,
    };

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Mint a new session credential bound to the current instant.
///
/// # Errors
/// Returns `ConfigurationMissing` when no signing secret is configured.
pub fn issue(context: &AuthContext) -> Result<Credential, AuthError> {
    let payload = context.now_millis().to_string();
    mint(context, payload.as_bytes())
}

/// Verify a presented session credential.
///
/// Never fails: every rejection reason collapses to an invalid result.
#[must_use]
pub fn verify(context: &AuthContext, presented: &str) -> Verification {
    match check(context, presented) {
        Ok(issued_at) => Verification {
            valid: true,
            issued_at: Some(issued_at),
        },
        Err(err) => {
            debug!("session credential rejected: {err}");
            Verification::INVALID
        }
    }
}

/// Same as [`verify`] but keeps the rejection reason.
pub(crate) fn check(context: &AuthContext, presented: &str) -> Result<i64, AuthError> {
    let secret = context.secret()?;
    let (payload, signature) = split(presented)?;
    verify_signature(secret, &payload, &signature)?;

    let issued_at = parse_millis(&payload)?;
    let now = context.now_millis();
    if issued_at > now {
        return Err(AuthError::NotYetValid);
    }
    if now.saturating_sub(issued_at) > MAX_SESSION_AGE_MS {
        return Err(AuthError::Expired);
    }

    Ok(issued_at)
}

pub(crate) fn mint(context: &AuthContext, payload: &[u8]) -> Result<Credential, AuthError> {
    let tag = signer::sign(context.secret()?, payload)?;
    Ok(Credential(format!(
        "{}.{}",
        codec::encode(payload),
        codec::encode(&tag)
    )))
}

/// Split on the single `.` separator and decode both halves.
pub(crate) fn split(presented: &str) -> Result<(Vec<u8>, Vec<u8>), AuthError> {
    let mut parts = presented.split('.');
    let (Some(payload), Some(signature), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedCredential);
    };
    if payload.is_empty() || signature.is_empty() {
        return Err(AuthError::MalformedCredential);
    }

    Ok((codec::decode(payload)?, codec::decode(signature)?))
}

pub(crate) fn verify_signature(
    secret: &[u8],
    payload: &[u8],
    signature: &[u8],
) -> Result<(), AuthError> {
    let expected = signer::sign(secret, payload)?;
    if compare::equal(&expected, signature) {
        Ok(())
    } else {
        Err(AuthError::SignatureMismatch)
    }
}

/// Parse a decimal millisecond timestamp. Signs, whitespace and empty input are rejected.
pub(crate) fn parse_millis(bytes: &[u8]) -> Result<i64, AuthError> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(AuthError::MalformedCredential);
    }
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or(AuthError::MalformedCredential)
}
