//! Session check, logout, and the guard applied to protected routes.

use axum::{
    Json,
    extract::{Extension, Request},
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{
    state::AuthState,
    transport::{authenticate, clear_session_cookie},
    types::SessionResponse,
};
use crate::auth::session::MAX_SESSION_AGE_MS;

/// Attached to requests that passed [`require_session`].
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub issued_at: i64,
}

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session is valid", body = SessionResponse),
        (status = 401, description = "No valid session")
    ),
    tag = "auth"
)]
pub async fn session(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    // Failure carries no body so callers cannot tell why a credential was refused.
    let Some(issued_at) = authenticate(&headers, auth_state.context()).and_then(|v| v.issued_at)
    else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let response = SessionResponse {
        authenticated: true,
        issued_at,
        expires_at: issued_at.saturating_add(MAX_SESSION_AGE_MS),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Session cookie cleared")
    ),
    tag = "auth"
)]
pub async fn logout() -> impl IntoResponse {
    // Credentials are stateless; clearing the cookie is all there is to do.
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear_session_cookie());
    (StatusCode::NO_CONTENT, headers)
}

/// Reject requests without a valid session credential (cookie or bearer).
pub async fn require_session(
    Extension(auth_state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(issued_at) =
        authenticate(request.headers(), auth_state.context()).and_then(|v| v.issued_at)
    else {
        let mut response = StatusCode::UNAUTHORIZED.into_response();
        response.headers_mut().insert(
            axum::http::header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Bearer"),
        );
        return response;
    };

    request.extensions_mut().insert(SessionContext { issued_at });
    next.run(request).await
}
