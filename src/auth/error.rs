use thiserror::Error;

/// Reasons a credential could not be issued or accepted.
///
/// These stay inside the crate boundary: callers of [`super::verify`] and
/// [`super::exchange`] only ever see a valid/invalid outcome.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("signing secret is not configured")]
    ConfigurationMissing,
    #[error("malformed credential")]
    MalformedCredential,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("credential expired")]
    Expired,
    #[error("credential issued in the future")]
    NotYetValid,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid base64url encoding")]
    MalformedEncoding,
}

impl From<CodecError> for AuthError {
    fn from(_: CodecError) -> Self {
        Self::MalformedCredential
    }
}
