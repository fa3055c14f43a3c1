//! dale-auth
//!
//! Stateless token issuance and validation for the Dale authentication gateway.
//! It covers four pieces:
//!
//! - **Token codec**: the `identity:expiry:signature` wire format, base64url wrapped
//! - **Signer/validator**: HMAC-SHA256 over `identity:expiry` plus expiry enforcement
//! - **Issuance checks**: the single configured credential pair and the client-credentials grant
//! - **Access decision**: cookie-then-bearer precedence, returned as a typed result
//!
//! Cookie header builders for the session cookie live here too, so the HTTP layer
//! only has to attach strings.
//!
//! ## Quick start
//! ```
//! use dale_auth::TokenSigner;
//! use std::time::Duration;
//!
//! let signer = TokenSigner::new("change-me-in-production", Duration::from_secs(3600));
//! let token = signer.sign("alice").unwrap();
//!
//! let verdict = signer.verify(&token);
//! assert!(verdict.ok);
//! assert_eq!(verdict.identity, "alice");
//! ```

#![forbid(unsafe_code)]

mod cookie;
mod decision;
mod error;
mod grant;
mod signer;
mod token;

pub use cookie::{
    CookieOptions, SESSION_COOKIE, SameSite, build_clear_cookie, build_set_cookie, find_cookie,
};
pub use decision::{AccessDecision, TokenSource, bearer_token, decide};
pub use error::{Error, Result};
pub use grant::{
    AGENT_IDENTITY, CLIENT_CREDENTIALS, ClientCredentialsGrant, Credentials, TokenResponse,
    evaluate_grant,
};
pub use signer::{TokenSigner, Verification, now_unix};
pub use token::{Token, validate_identity};
