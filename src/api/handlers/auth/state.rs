//! Auth state shared by the handlers.

use url::Url;

use crate::auth::{AuthContext, sanitize_next};

const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    public_url: Url,
    login_path: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(public_url: Url) -> Self {
        Self {
            public_url,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// Where failed capability exchanges send the browser. Only internal paths are kept.
    #[must_use]
    pub fn with_login_path(mut self, login_path: &str) -> Self {
        self.login_path = sanitize_next(Some(login_path));
        self
    }

    #[must_use]
    pub fn public_url(&self) -> &Url {
        &self.public_url
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

#[derive(Debug)]
pub struct AuthState {
    context: AuthContext,
    config: AuthConfig,
}

impl AuthState {
    #[must_use]
    pub fn new(context: AuthContext, config: AuthConfig) -> Self {
        Self { context, config }
    }

    #[must_use]
    pub fn context(&self) -> &AuthContext {
        &self.context
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
