//! Short-lived capability tokens that bootstrap a browser session from an
//! out-of-band channel.
//!
//! A capability token has the same shape as a session credential but its payload is
//! `confirm:<issued_at_millis>` and it is only accepted for two minutes. Exchanging it
//! never reuses the token itself: a brand new session credential is minted instead.
//!
//! Tokens are not tracked after use. A captured token stays replayable until its
//! window closes.

use tracing::debug;

use super::{
    AuthContext, AuthError, Credential,
    session::{self, parse_millis, split, verify_signature},
};

pub const CAPABILITY_PREFIX: &str = "confirm:";

pub const CAPABILITY_TTL_MS: i64 = 2 * 60 * 1000;

/// Result of [`exchange`]. `Failed` carries no reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Granted { session: Credential, redirect: String },
    Failed,
}

impl ExchangeOutcome {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }
}

/// Mint a capability token for the current instant.
///
/// # Errors
/// Returns `ConfigurationMissing` when no signing secret is configured.
pub fn issue_capability(context: &AuthContext) -> Result<Credential, AuthError> {
    let payload = format!("{CAPABILITY_PREFIX}{}", context.now_millis());
    session::mint(context, payload.as_bytes())
}

/// Trade a fresh capability token for a new session credential.
///
/// `next` is reduced to an internal path by [`sanitize_next`].
#[must_use]
pub fn exchange(context: &AuthContext, token: &str, next: Option<&str>) -> ExchangeOutcome {
    let granted = check_capability(context, token).and_then(|_| session::issue(context));
    match granted {
        Ok(session) => ExchangeOutcome::Granted {
            session,
            redirect: sanitize_next(next),
        },
        Err(err) => {
            debug!("capability exchange rejected: {err}");
            ExchangeOutcome::Failed
        }
    }
}

/// Validate a capability token, returning its issue instant.
pub(crate) fn check_capability(context: &AuthContext, token: &str) -> Result<i64, AuthError> {
    let secret = context.secret()?;
    let (payload, signature) = split(token)?;

    let millis = payload
        .strip_prefix(CAPABILITY_PREFIX.as_bytes())
        .ok_or(AuthError::MalformedCredential)?;
    let issued_at = parse_millis(millis)?;

    let age = context.now_millis().saturating_sub(issued_at);
    if age < 0 {
        return Err(AuthError::NotYetValid);
    }
    if age > CAPABILITY_TTL_MS {
        return Err(AuthError::Expired);
    }

    verify_signature(secret, &payload, &signature)?;

    Ok(issued_at)
}

/// Keep `next` only when it is a path on this origin; otherwise `/`.
///
/// Targets starting with `//` or `/\` are treated by browsers as scheme-relative
/// URLs to another host, so they are rejected as well.
#[must_use]
pub fn sanitize_next(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
