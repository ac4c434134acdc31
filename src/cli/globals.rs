use secrecy::{ExposeSecret, SecretString};

use crate::auth::{AuthContext, SecretConfig};

/// Secrets shared by every action.
#[derive(Clone, Default)]
pub struct GlobalArgs {
    pub password: SecretString,
    pub session_secret: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(password: SecretString) -> Self {
        Self {
            password,
            session_secret: None,
        }
    }

    pub fn set_session_secret(&mut self, secret: SecretString) {
        self.session_secret = Some(secret);
    }

    /// Resolve the secrets into an [`AuthContext`] on the system clock.
    ///
    /// The password doubles as the signing secret unless a dedicated one is set.
    #[must_use]
    pub fn auth_context(&self) -> AuthContext {
        let password = SecretConfig::from_raw(self.password.expose_secret());
        let signing = self.session_secret.as_ref().map_or_else(
            || SecretConfig::from_raw(self.password.expose_secret()),
            |secret| SecretConfig::from_raw(secret.expose_secret()),
        );
        AuthContext::with_system_clock(signing, password)
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("password", &"***")
            .field(
                "session_secret",
                &self.session_secret.as_ref().map(|_| "***"),
            )
            .finish()
    }
}
