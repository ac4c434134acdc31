//! Stateless credential protocol: encoding, signing, comparison and the
//! session / capability token lifecycles built on top of them.
//!
//! Everything in here is synchronous and free of I/O. The only inputs besides
//! the presented bytes are the signing secret and the clock, both carried by
//! an explicitly constructed [`AuthContext`].

pub mod capability;
pub mod codec;
pub mod compare;
pub mod context;
mod error;
pub mod session;
pub mod signer;

pub use capability::{ExchangeOutcome, exchange, issue_capability, sanitize_next};
pub use context::{AuthContext, Clock, ManualClock, SecretConfig, SystemClock};
pub use error::{AuthError, CodecError};
pub use session::{Credential, Verification, issue, verify};
