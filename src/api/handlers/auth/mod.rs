//! Auth handlers: password login, session check and teardown, and the
//! capability token bootstrap path.
//!
//! ## Capability Bootstrap
//!
//! A signed-in operator (or a script holding the signing secret, see the
//! `capability` CLI subcommand) mints a two-minute token and delivers the
//! exchange link through another channel. Opening the link sets a fresh session
//! cookie and redirects to the requested internal path. Any failure redirects
//! to the login page without saying why.

pub(crate) mod capability;
pub(crate) mod login;
pub(crate) mod session;
mod state;
pub(crate) mod transport;
pub(crate) mod types;

pub use capability::{EXCHANGE_PATH, exchange_url};
pub use session::{SessionContext, require_session};
pub use state::{AuthConfig, AuthState};
pub use transport::SESSION_COOKIE_NAME;
