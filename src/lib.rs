//! # Latchkey (Single-Password Session Bootstrap)
//!
//! `latchkey` guards a web application behind one operator-configured password
//! and hands out stateless, HMAC-signed session credentials.
//!
//! ## Session Credentials
//!
//! A credential is `base64url(issued_at_millis) "." base64url(hmac_sha256(secret, issued_at_millis))`.
//! Nothing is stored server side: the signature is the only proof, and a credential is
//! accepted for 30 days after it was minted. The same value is delivered as an `HttpOnly`
//! cookie and in the login response body, so clients may replay it as a bearer token.
//!
//! ## Capability Tokens
//!
//! A second, out-of-band channel (a notification link, a script holding the secret) can
//! mint a `confirm:`-prefixed token that is valid for two minutes. The browser exchanges it
//! once at `/v1/auth/exchange` and receives a fresh, unrelated session credential.
//!
//! ## Failure Reporting
//!
//! Every verification failure collapses to a single "invalid" outcome. Callers never learn
//! whether a credential was forged, expired or malformed.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
