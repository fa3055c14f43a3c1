//! Authorization decision for the `/check` endpoint.

use crate::signer::TokenSigner;

/// Where an accepted token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// The `session` cookie.
    Cookie,
    /// An `Authorization: Bearer` header.
    Bearer,
    /// Nothing was accepted.
    None,
}

/// Result of an authorization check. Carries no rejection reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    /// Resolved identity when allowed.
    pub identity: Option<String>,
    /// Carrier of the accepted token.
    pub source: TokenSource,
}

impl AccessDecision {
    /// True if the request may proceed.
    pub fn is_allowed(&self) -> bool {
        self.identity.is_some()
    }

    fn deny() -> Self {
        Self {
            identity: None,
            source: TokenSource::None,
        }
    }
}

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization.strip_prefix("Bearer ")
}

/// Decide whether a request is authenticated.
///
/// - The cookie token is tried first.
/// - A cookie that fails validation does not block the bearer header.
/// - Anything else is denied.
pub fn decide(
    cookie_token: Option<&str>,
    authorization: Option<&str>,
    signer: &TokenSigner,
    now: i64,
) -> AccessDecision {
    let candidates = [
        (cookie_token, TokenSource::Cookie),
        (authorization.and_then(bearer_token), TokenSource::Bearer),
    ];

    for (token, source) in candidates {
        let Some(token) = token else { continue };
        let verdict = signer.verify_at(token, now);
        if verdict.ok {
            return AccessDecision {
                identity: Some(verdict.identity),
                source,
            };
        }
    }

    AccessDecision::deny()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const T: i64 = 1_700_000_000;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", Duration::from_secs(3600))
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let s = signer();
        let cookie = s.sign_at("alice", T).unwrap();
        let bearer = format!("Bearer {}", s.sign_at("agent", T).unwrap());

        let d = decide(Some(&cookie), Some(&bearer), &s, T);
        assert_eq!(d.identity.as_deref(), Some("alice"));
        assert_eq!(d.source, TokenSource::Cookie);
    }

    #[test]
    fn bad_cookie_falls_through_to_bearer() {
        let s = signer();
        let bearer = format!("Bearer {}", s.sign_at("agent", T).unwrap());

        let d = decide(Some("garbage"), Some(&bearer), &s, T);
        assert_eq!(d.identity.as_deref(), Some("agent"));
        assert_eq!(d.source, TokenSource::Bearer);
    }

    #[test]
    fn nothing_presented_is_denied() {
        let d = decide(None, None, &signer(), T);
        assert!(!d.is_allowed());
        assert_eq!(d.source, TokenSource::None);
    }

    #[test]
    fn non_bearer_scheme_is_ignored() {
        let s = signer();
        let basic = format!("Basic {}", s.sign_at("alice", T).unwrap());
        assert!(!decide(None, Some(&basic), &s, T).is_allowed());
        assert_eq!(bearer_token("bearer abc"), None);
    }

    #[test]
    fn expired_bearer_is_denied() {
        let s = signer();
        let bearer = format!("Bearer {}", s.sign_at("agent", T).unwrap());
        assert!(!decide(None, Some(&bearer), &s, T + 3601).is_allowed());
    }
}
