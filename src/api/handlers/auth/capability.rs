//! Capability token issuance and the one-shot exchange endpoint.

use anyhow::{Result, bail};
use axum::{
    Json,
    extract::{
        Extension, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, REFERRER_POLICY, SET_COOKIE},
    },
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use url::Url;

use super::{
    session::SessionContext,
    state::AuthState,
    transport::session_cookie,
    types::{CapabilityRequest, CapabilityResponse, ExchangeQuery},
};
use crate::auth::{
    self, Credential, ExchangeOutcome, capability::CAPABILITY_TTL_MS, sanitize_next,
};

pub const EXCHANGE_PATH: &str = "/v1/auth/exchange";

/// Build the link a browser follows to trade `token` for a session.
///
/// Any path on `public_url` is kept as a prefix, so a service mounted under
/// `https://host/app` hands out `https://host/app/v1/auth/exchange?...`.
///
/// # Errors
/// Returns an error if the public URL cannot carry a path (e.g. `mailto:`).
pub fn exchange_url(public_url: &Url, token: &Credential, next: Option<&str>) -> Result<Url> {
    if public_url.cannot_be_a_base() {
        bail!("Invalid public URL: {public_url}");
    }

    let mut url = public_url.clone();
    let base = public_url.path().trim_end_matches('/');
    url.set_path(&format!("{base}{EXCHANGE_PATH}"));
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("token", token.as_str());
        if next.is_some() {
            query.append_pair("next", &sanitize_next(next));
        }
    }
    Ok(url)
}

#[utoipa::path(
    post,
    path = "/v1/auth/capability",
    request_body(content = CapabilityRequest, description = "Optional path to land on after the exchange"),
    responses(
        (status = 200, description = "Capability token minted", body = CapabilityResponse),
        (status = 401, description = "No valid session")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn issue_capability(
    auth_state: Extension<Arc<AuthState>>,
    session: Extension<SessionContext>,
    payload: Result<Json<CapabilityRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = payload.map(|Json(request)| request).unwrap_or_default();

    let token = match auth::issue_capability(auth_state.context()) {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue capability token: {err}");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    let url = match exchange_url(
        auth_state.config().public_url(),
        &token,
        request.next.as_deref(),
    ) {
        Ok(url) => url,
        Err(err) => {
            error!("Failed to build exchange URL: {err:#}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    debug!(session_issued_at = session.issued_at, "capability token issued");

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    let body = CapabilityResponse {
        token: token.into_string(),
        expires_in: CAPABILITY_TTL_MS / 1000,
        url: url.to_string(),
    };
    (StatusCode::OK, headers, Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/v1/auth/exchange",
    params(
        ("token" = String, Query, description = "Capability token"),
        ("next" = Option<String>, Query, description = "Internal path to redirect to")
    ),
    responses(
        (status = 303, description = "Redirect to `next` with a session cookie, or to the login page")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn exchange(
    auth_state: Extension<Arc<AuthState>>,
    query: Result<Query<ExchangeQuery>, QueryRejection>,
) -> Response {
    let query = query.map(|Query(query)| query).unwrap_or_default();

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    // The token travels in the URL; keep it out of Referer headers on the next page.
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    let outcome = query.token.as_deref().map_or(ExchangeOutcome::Failed, |token| {
        auth::exchange(auth_state.context(), token, query.next.as_deref())
    });

    let target = match outcome {
        ExchangeOutcome::Granted { session, redirect } => match session_cookie(&session) {
            Ok(cookie) => {
                info!("capability token exchanged for a session");
                headers.insert(SET_COOKIE, cookie);
                redirect
            }
            Err(err) => {
                error!("Failed to build session cookie: {err}");
                auth_state.config().login_path().to_string()
            }
        },
        ExchangeOutcome::Failed => auth_state.config().login_path().to_string(),
    };

    (headers, Redirect::to(&target)).into_response()
}
