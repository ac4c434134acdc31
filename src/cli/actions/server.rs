use crate::{
    api::{
        self,
        handlers::auth::{AuthConfig, AuthState},
    },
    cli::{globals::GlobalArgs, telemetry},
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub public_url: Url,
    pub login_path: String,
    pub globals: GlobalArgs,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to bind or serve.
pub async fn execute(args: Args) -> Result<()> {
    let context = args.globals.auth_context();
    if !context.is_configured() {
        warn!("LATCHKEY_PASSWORD is not set: every login will be refused");
    }

    let config = AuthConfig::new(args.public_url).with_login_path(&args.login_path);
    debug!(
        public_url = %config.public_url(),
        login_path = config.login_path(),
        "auth configuration"
    );

    let auth_state = Arc::new(AuthState::new(context, config));
    let result = api::new(args.port, auth_state).await;

    telemetry::shutdown_tracer();

    result
}
