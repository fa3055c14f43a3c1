//! Error types.

use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
///
/// The token variants are kept apart for logging. Callers facing the network
/// collapse them into a single rejection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Token is not valid base64url or does not split into three fields.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Identity cannot be carried by the wire format.
    #[error("invalid identity: {0:?}")]
    InvalidIdentity(String),

    /// Signature does not match the payload under the configured secret.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Token is well formed and signed but past its expiry.
    #[error("token expired at {0}")]
    Expired(i64),

    /// Presented username/password or client id/secret do not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Grant type other than `client_credentials`.
    #[error("unsupported grant type: {0:?}")]
    UnsupportedGrantType(String),

    /// Cookie attributes are inconsistent.
    #[error("invalid cookie options: {0}")]
    Cookie(String),
}
