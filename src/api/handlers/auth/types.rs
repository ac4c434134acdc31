//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

// Manual Debug so the password never reaches the logs.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("password", &"***")
            .finish()
    }
}

/// Returned on successful login. `token` is the same value set in the session cookie.
#[derive(ToSchema, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub issued_at: i64,
    pub expires_at: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct CapabilityRequest {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize)]
pub struct CapabilityResponse {
    pub token: String,
    pub expires_in: i64,
    pub url: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ExchangeQuery {
    pub token: Option<String>,
    pub next: Option<String>,
}
