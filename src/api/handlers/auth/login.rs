//! Password login: the only place a session is minted from the operator password.

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, SET_COOKIE},
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::{
    state::AuthState,
    transport::session_cookie,
    types::{LoginRequest, LoginResponse},
};
use crate::auth::{issue, session::MAX_SESSION_AGE_SECONDS};

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Password accepted, session cookie set", body = LoginResponse),
        (status = 401, description = "Login failed")
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(request)) = payload else {
        debug!("login rejected: missing or malformed payload");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let context = auth_state.context();
    if !context.check_password(&request.password) {
        debug!("login rejected: password mismatch");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let credential = match issue(context) {
        Ok(credential) => credential,
        Err(err) => {
            error!("Failed to issue session: {err}");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    let cookie = match session_cookie(&credential) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!("session issued");

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    let body = LoginResponse {
        token: credential.into_string(),
        expires_in: MAX_SESSION_AGE_SECONDS,
    };

    (StatusCode::OK, headers, Json(body)).into_response()
}
