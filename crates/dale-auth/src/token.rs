//! Token wire format.
//!
//! A token is `base64url(identity ":" expiry ":" base64url(signature))`.
//! Both layers use the padded URL-safe alphabet, so the result only contains
//! `A-Z a-z 0-9 - _ =` and can be used as a cookie value or a header value
//! as is.
//!
//! `:` is the field delimiter and is never escaped: identities containing it
//! (or whitespace) are refused at encode time, and a decoded payload must
//! split into exactly three fields.

use crate::{Error, Result};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

const DELIMITER: char = ':';

/// Decoded token fields. Carries no validity guarantee on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Authenticated principal.
    pub identity: String,
    /// Unix timestamp (seconds) after which the token is rejected.
    pub expiry: i64,
    /// Raw HMAC-SHA256 bytes.
    pub signature: Vec<u8>,
}

impl Token {
    /// The signed part of the token, `identity:expiry`.
    pub fn payload(&self) -> String {
        signing_payload(&self.identity, self.expiry)
    }

    /// Encode into the opaque wire string.
    pub fn encode(&self) -> Result<String> {
        validate_identity(&self.identity)?;
        let joined = format!(
            "{}{DELIMITER}{}",
            self.payload(),
            URL_SAFE.encode(&self.signature)
        );
        Ok(URL_SAFE.encode(joined))
    }

    /// Decode a wire string back into its fields.
    pub fn decode(token: &str) -> Result<Self> {
        let raw = URL_SAFE
            .decode(token)
            .map_err(|e| Error::MalformedToken(format!("outer base64: {e}")))?;
        let joined = String::from_utf8(raw)
            .map_err(|_| Error::MalformedToken("payload is not UTF-8".to_string()))?;

        let parts: Vec<&str> = joined.split(DELIMITER).collect();
        let [identity, expiry, signature] = parts.as_slice() else {
            return Err(Error::MalformedToken(format!(
                "expected 3 fields, got {}",
                parts.len()
            )));
        };

        let expiry = parse_expiry(expiry)?;
        let signature = URL_SAFE
            .decode(signature)
            .map_err(|e| Error::MalformedToken(format!("signature base64: {e}")))?;

        Ok(Self {
            identity: (*identity).to_string(),
            expiry,
            signature,
        })
    }
}

/// `identity:expiry`, the bytes covered by the HMAC.
pub(crate) fn signing_payload(identity: &str, expiry: i64) -> String {
    format!("{identity}{DELIMITER}{expiry}")
}

/// Parse the expiry field. Only the canonical decimal form is accepted
/// (no sign, no leading zeros), so the re-formatted payload is byte-identical
/// to the one that was signed.
fn parse_expiry(raw: &str) -> Result<i64> {
    let expiry = raw
        .parse::<i64>()
        .map_err(|_| Error::MalformedToken("expiry is not an integer".to_string()))?;
    if expiry.to_string() != raw {
        return Err(Error::MalformedToken(
            "expiry is not in canonical form".to_string(),
        ));
    }
    Ok(expiry)
}

/// Reject identities the wire format cannot carry.
pub fn validate_identity(identity: &str) -> Result<()> {
    if identity.is_empty()
        || identity.contains(DELIMITER)
        || identity.chars().any(char::is_whitespace)
    {
        return Err(Error::InvalidIdentity(identity.to_string()));
    }
    Ok(())
}
