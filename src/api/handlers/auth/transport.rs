//! The two carriers of a session credential: the `latchkey_session` cookie and an
//! `Authorization: Bearer` header. Both hold the exact same value.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{AUTHORIZATION, COOKIE, InvalidHeaderValue},
};

use crate::auth::{
    AuthContext, Credential, Verification, session::MAX_SESSION_AGE_SECONDS, verify,
};

pub const SESSION_COOKIE_NAME: &str = "latchkey_session";

/// Build the `Set-Cookie` value carrying a freshly issued credential.
///
/// No `Domain` attribute is set so the cookie stays bound to the serving host.
pub(crate) fn session_cookie(credential: &Credential) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={}; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age={MAX_SESSION_AGE_SECONDS}",
        credential.as_str()
    ))
}

pub(crate) fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "latchkey_session=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0",
    )
}

/// Resolve the request's credential: cookie first, then the bearer header when the
/// cookie is missing or does not verify.
pub(crate) fn authenticate(headers: &HeaderMap, context: &AuthContext) -> Option<Verification> {
    extract_cookie_credential(headers)
        .map(|credential| verify(context, &credential))
        .filter(Verification::is_valid)
        .or_else(|| {
            extract_bearer_credential(headers)
                .map(|credential| verify(context, &credential))
                .filter(Verification::is_valid)
        })
}

pub(crate) fn extract_cookie_credential(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == SESSION_COOKIE_NAME)
                .then(|| val.trim().trim_matches('"'))
                .filter(|val| !val.is_empty())
                .map(str::to_string)
        })
}

pub(crate) fn extract_bearer_credential(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
