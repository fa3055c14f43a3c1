//! HMAC-SHA256 token signing and validation.

use crate::token::{Token, signing_payload, validate_identity};
use crate::{Error, Result};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Outcome of [`TokenSigner::verify`].
///
/// Every failure looks the same: `identity` is empty and `ok` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Resolved principal, empty on rejection.
    pub identity: String,
    /// True only for a well-formed, correctly signed, unexpired token.
    pub ok: bool,
}

impl Verification {
    fn rejected() -> Self {
        Self {
            identity: String::new(),
            ok: false,
        }
    }
}

/// Mints and validates tokens with a shared secret and a fixed TTL.
///
/// Holds no mutable state; validity is a function of the token, the clock
/// and the secret only.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Arc<[u8]>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret_len", &self.secret.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Create a signer. HMAC accepts keys of any length, including empty.
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Token lifetime in whole seconds, as reported by `expires_in`.
    pub fn expires_in(&self) -> u64 {
        self.ttl.as_secs()
    }

    /// Mint a token for `identity` expiring `ttl` from now.
    pub fn sign(&self, identity: &str) -> Result<String> {
        self.sign_at(identity, now_unix())
    }

    /// Mint a token as if the current time were `now` (Unix seconds).
    pub fn sign_at(&self, identity: &str, now: i64) -> Result<String> {
        validate_identity(identity)?;
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let expiry = now.saturating_add(ttl);
        let token = Token {
            identity: identity.to_string(),
            expiry,
            signature: self.mac(&signing_payload(identity, expiry)),
        };
        token.encode()
    }

    /// Validate a token against the current time.
    pub fn verify(&self, token: &str) -> Verification {
        self.verify_at(token, now_unix())
    }

    /// Validate a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Verification {
        match self.check_at(token, now) {
            Ok(identity) => Verification { identity, ok: true },
            Err(_) => Verification::rejected(),
        }
    }

    /// Like [`verify_at`](Self::verify_at) but keeps the rejection reason.
    ///
    /// Signature is checked before expiry, so an expired forgery reports
    /// `SignatureMismatch`.
    pub fn check_at(&self, token: &str, now: i64) -> Result<String> {
        let token = Token::decode(token)?;

        let mut mac = self.hmac();
        mac.update(token.payload().as_bytes());
        mac.verify_slice(&token.signature)
            .map_err(|_| Error::SignatureMismatch)?;

        if now > token.expiry {
            return Err(Error::Expired(token.expiry));
        }

        Ok(token.identity)
    }

    fn hmac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length")
    }

    fn mac(&self, payload: &str) -> Vec<u8> {
        let mut mac = self.hmac();
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Current Unix time in seconds.
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
