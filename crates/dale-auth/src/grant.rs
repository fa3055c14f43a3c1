//! Credential checks for the login form and the client-credentials grant.

use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Identity given to every token minted through the client-credentials grant.
pub const AGENT_IDENTITY: &str = "agent";

/// The only grant type accepted at the token endpoint.
pub const CLIENT_CREDENTIALS: &str = "client_credentials";

/// The single configured username/password pair.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Create the pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Configured username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// True if both values match. Both comparisons always run, so the
    /// outcome does not reveal which field was wrong.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

/// Fields of `POST /oauth2/token`. Missing fields decode as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientCredentialsGrant {
    /// Client identifier (the configured username).
    #[serde(default)]
    pub client_id: String,
    /// Client secret (the configured password).
    #[serde(default)]
    pub client_secret: String,
    /// Must be `client_credentials`.
    #[serde(default)]
    pub grant_type: String,
}

/// Check a grant request. The grant type is checked before the client.
pub fn evaluate_grant(grant: &ClientCredentialsGrant, credentials: &Credentials) -> Result<()> {
    if grant.grant_type != CLIENT_CREDENTIALS {
        return Err(Error::UnsupportedGrantType(grant.grant_type.clone()));
    }
    if !credentials.matches(&grant.client_id, &grant.client_secret) {
        return Err(Error::InvalidCredentials);
    }
    Ok(())
}

/// Successful token endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Minted token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

impl TokenResponse {
    /// Bearer response for `access_token`.
    pub fn bearer(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("admin", "password")
    }

    fn grant(id: &str, secret: &str, grant_type: &str) -> ClientCredentialsGrant {
        ClientCredentialsGrant {
            client_id: id.to_string(),
            client_secret: secret.to_string(),
            grant_type: grant_type.to_string(),
        }
    }

    #[test]
    fn credentials_need_both_fields() {
        let c = creds();
        assert!(c.matches("admin", "password"));
        assert!(!c.matches("admin", "wrong"));
        assert!(!c.matches("root", "password"));
        assert!(!c.matches("", ""));
    }

    #[test]
    fn grant_type_checked_first() {
        let err = evaluate_grant(&grant("x", "y", "authorization_code"), &creds()).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedGrantType("authorization_code".to_string())
        );
    }

    #[test]
    fn wrong_client_is_invalid() {
        let err = evaluate_grant(&grant("admin", "nope", CLIENT_CREDENTIALS), &creds()).unwrap_err();
        assert_eq!(err, Error::InvalidCredentials);
    }

    #[test]
    fn good_grant_passes() {
        assert!(evaluate_grant(&grant("admin", "password", CLIENT_CREDENTIALS), &creds()).is_ok());
    }

    #[test]
    fn token_response_shape() {
        let json = serde_json::to_value(TokenResponse::bearer("t".to_string(), 86_400)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"access_token": "t", "token_type": "Bearer", "expires_in": 86400})
        );
    }

    #[test]
    fn debug_hides_password() {
        assert_eq!(format!("{:?}", creds()), "Credentials { username: \"admin\", .. }");
    }
}
