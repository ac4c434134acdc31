//! End-to-end bootstrap flow through the public router.

use anyhow::{Context, Result};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use latchkey::{
    api::{
        self,
        handlers::auth::{AuthConfig, AuthState, SESSION_COOKIE_NAME},
    },
    auth::{AuthContext, ManualClock, SecretConfig, verify},
};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

const START: i64 = 1_750_000_000_000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn build(
    password: &str,
    signing: &str,
    clock: Arc<ManualClock>,
) -> Result<(Router, Arc<AuthState>)> {
    let context = AuthContext::new(
        SecretConfig::from_raw(signing),
        SecretConfig::from_raw(password),
        clock,
    );
    let config =
        AuthConfig::new(Url::parse("https://chat.example.com")?).with_login_path("/welcome");
    let state = Arc::new(AuthState::new(context, config));
    Ok((api::app(state.clone()), state))
}

async fn login(router: &Router, password: &str) -> Result<Response> {
    let body = serde_json::json!({ "password": password }).to_string();
    Ok(router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/auth/login")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body))?,
        )
        .await?)
}

async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Result<Response> {
    let mut request = Request::builder().uri(uri);
    if let Some(value) = cookie {
        request = request.header(COOKIE, format!("{SESSION_COOKIE_NAME}={value}"));
    }
    Ok(router.clone().oneshot(request.body(Body::empty())?).await?)
}

fn cookie_value(response: &Response) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    let rest = header.strip_prefix(&format!("{SESSION_COOKIE_NAME}="))?;
    rest.split(';').next().map(str::to_string)
}

#[tokio::test]
async fn password_login_then_capability_handoff() -> Result<()> {
    let clock = Arc::new(ManualClock::new(START));
    let (router, state) = build("correct", "correct", clock.clone())?;

    let response = login(&router, "wrong").await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let response = login(&router, "correct").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let session = cookie_value(&response).context("login did not set a cookie")?;
    assert!(!session.is_empty());
    assert!(verify(state.context(), &session).is_valid());

    // Mint a link for another device using the browser session.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/auth/capability")
                .header(COOKIE, format!("{SESSION_COOKIE_NAME}={session}"))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"next":"/chat/42"}"#))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    let link = Url::parse(body["url"].as_str().context("missing url")?)?;
    let exchange_uri = format!("{}?{}", link.path(), link.query().unwrap_or_default());

    clock.advance(60_000);
    let response = get(&router, &exchange_uri, None).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/chat/42")
    );
    let second = cookie_value(&response).context("exchange did not set a cookie")?;

    let response = get(&router, "/v1/auth/session", Some(&second)).await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Both sessions run out after thirty days.
    clock.advance(31 * DAY_MS);
    let response = get(&router, "/v1/auth/session", Some(&second)).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!verify(state.context(), &session).is_valid());
    Ok(())
}

#[tokio::test]
async fn stale_link_sends_browser_to_login() -> Result<()> {
    let clock = Arc::new(ManualClock::new(START));
    let (router, state) = build("correct", "correct", clock.clone())?;

    let token = latchkey::auth::issue_capability(state.context())?;
    let link = api::handlers::auth::exchange_url(
        state.config().public_url(),
        &token,
        Some("/chat/42"),
    )?;

    clock.advance(3 * 60 * 1000);
    let uri = format!("{}?{}", link.path(), link.query().unwrap_or_default());
    let response = get(&router, &uri, None).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/welcome")
    );
    assert!(response.headers().get(SET_COOKIE).is_none());
    Ok(())
}

#[tokio::test]
async fn rotating_the_signing_secret_revokes_sessions() -> Result<()> {
    let clock = Arc::new(ManualClock::new(START));
    let (router, _) = build("correct", "first-key", clock.clone())?;
    let response = login(&router, "correct").await?;
    let session = cookie_value(&response).context("login did not set a cookie")?;

    let (rotated, _) = build("correct", "second-key", clock)?;
    let response = get(&rotated, "/v1/auth/session", Some(&session)).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&router, "/v1/auth/session", Some(&session)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn root_banner_and_openapi_document() -> Result<()> {
    let clock = Arc::new(ManualClock::new(START));
    let (router, _) = build("correct", "correct", clock)?;

    let response = get(&router, "/", None).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = serde_json::to_value(api::openapi())?;
    let paths = doc["paths"].as_object().context("missing paths")?;
    for path in [
        "/health",
        "/v1/auth/login",
        "/v1/auth/session",
        "/v1/auth/logout",
        "/v1/auth/capability",
        "/v1/auth/exchange",
    ] {
        assert!(paths.contains_key(path), "{path} not documented");
    }
    Ok(())
}
