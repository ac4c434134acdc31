use super::auth::AuthState;
use crate::GIT_COMMIT_HASH;
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    signing: String,
}

impl Health {
    fn current(signing_configured: bool) -> Self {
        Self {
            commit: GIT_COMMIT_HASH.to_string(),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            signing: if signing_configured { "ok" } else { "missing" }.to_string(),
        }
    }

    /// `name:version:shortsha`, the short hash left empty for non-git builds.
    fn x_app(&self) -> Option<HeaderValue> {
        let short_hash = self.commit.get(..7).filter(|_| self.commit.len() > 7);
        HeaderValue::from_str(&format!(
            "{}:{}:{}",
            self.name,
            self.version,
            short_hash.unwrap_or_default()
        ))
        .ok()
    }
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Signing secret is configured", body = [Health]),
        (status = 503, description = "No signing secret, every login and session check fails", body = [Health])
    ),
    tag= "health"
)]
pub async fn health(method: Method, auth_state: Extension<Arc<AuthState>>) -> Response {
    let configured = auth_state.context().is_configured();
    let health = Health::current(configured);

    let mut headers = HeaderMap::new();
    match health.x_app() {
        Some(value) => {
            headers.insert("x-app", value);
        }
        None => warn!("X-App header value is not valid ASCII"),
    }

    let status = if configured {
        StatusCode::OK
    } else {
        debug!("health: signing secret is not configured");
        StatusCode::SERVICE_UNAVAILABLE
    };

    // HEAD gets the same status and headers without a body.
    if method == Method::HEAD {
        return (status, headers, Body::empty()).into_response();
    }
    (status, headers, Json(health)).into_response()
}
