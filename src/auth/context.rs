//! Process-wide signing material and time source.

use secrecy::{ExposeSecret, SecretSlice};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use super::{AuthError, compare};

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
            })
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    #[must_use]
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// A secret value resolved once at startup.
///
/// Surrounding whitespace and stray line breaks (typical of values pasted into
/// env files or mounted from secret stores) are removed before the bytes are kept.
pub struct SecretConfig {
    secret: SecretSlice<u8>,
}

impl SecretConfig {
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let normalized: Vec<u8> = raw
            .trim()
            .bytes()
            .filter(|byte| *byte != b'\r' && *byte != b'\n')
            .collect();
        Self {
            secret: SecretSlice::from(normalized),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            secret: SecretSlice::from(Vec::new()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secret.expose_secret().is_empty()
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.secret.expose_secret()
    }
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretConfig")
            .field("secret", &"***")
            .field("configured", &!self.is_empty())
            .finish()
    }
}

/// Everything the issuers and verifiers need: the signing secret, the operator
/// password and a clock.
pub struct AuthContext {
    signing: SecretConfig,
    password: SecretConfig,
    clock: Arc<dyn Clock>,
}

impl AuthContext {
    #[must_use]
    pub fn new(signing: SecretConfig, password: SecretConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            signing,
            password,
            clock,
        }
    }

    #[must_use]
    pub fn with_system_clock(signing: SecretConfig, password: SecretConfig) -> Self {
        Self::new(signing, password, Arc::new(SystemClock))
    }

    /// Whether a signing secret is available. Without one nothing is ever issued or accepted.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.signing.is_empty()
    }

    /// Check a presented login password against the configured one.
    ///
    /// Always `false` when no password is configured.
    #[must_use]
    pub fn check_password(&self, presented: &str) -> bool {
        if self.password.is_empty() {
            return false;
        }
        compare::equal(self.password.expose(), presented.as_bytes())
    }

    #[must_use]
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub(crate) fn secret(&self) -> Result<&[u8], AuthError> {
        if self.signing.is_empty() {
            return Err(AuthError::ConfigurationMissing);
        }
        Ok(self.signing.expose())
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("signing", &self.signing)
            .field("password", &self.password)
            .finish_non_exhaustive()
    }
}
