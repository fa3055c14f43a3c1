//! Session cookie helpers.

use crate::{Error, Result};
use httpdate::fmt_http_date;
use std::time::UNIX_EPOCH;

/// Name of the cookie carrying the token.
pub const SESSION_COOKIE: &str = "session";

/// SameSite attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// SameSite=Strict
    Strict,
    /// SameSite=Lax
    Lax,
    /// SameSite=None
    None,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by the issuing and the clearing cookie.
#[derive(Debug, Clone)]
pub struct CookieOptions {
    /// Cookie name.
    pub name: String,

    /// Cookie path.
    pub path: String,

    /// Optional cookie domain, e.g. `.example.com` to cover subdomains.
    pub domain: Option<String>,

    /// Send on HTTPS only.
    pub secure: bool,

    /// Not accessible to JS.
    pub http_only: bool,

    /// SameSite attribute.
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            name: SESSION_COOKIE.to_string(),
            path: "/".to_string(),
            domain: None,
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
        }
    }
}

impl CookieOptions {
    /// Session cookie scoped to `domain`.
    pub fn session(domain: impl Into<String>, secure: bool) -> Self {
        Self {
            domain: Some(domain.into()),
            secure,
            ..Self::default()
        }
    }
}

fn common_attributes(opts: &CookieOptions) -> Result<Vec<String>> {
    // Browsers drop SameSite=None cookies that are not Secure.
    if opts.same_site == SameSite::None && !opts.secure {
        return Err(Error::Cookie(
            "SameSite=None cookies must be Secure".to_string(),
        ));
    }
    if opts.name.is_empty() {
        return Err(Error::Cookie("cookie name is empty".to_string()));
    }

    let mut parts: Vec<String> = Vec::new();
    parts.push(format!("Path={}", opts.path));

    if let Some(domain) = &opts.domain {
        parts.push(format!("Domain={domain}"));
    }

    if opts.secure {
        parts.push("Secure".to_string());
    }
    if opts.http_only {
        parts.push("HttpOnly".to_string());
    }

    parts.push(format!("SameSite={}", opts.same_site.as_str()));
    Ok(parts)
}

/// Build a `Set-Cookie` header value carrying `value`.
///
/// No `Max-Age`: the cookie lives for the browser session and the token
/// inside enforces its own expiry.
pub fn build_set_cookie(value: &str, opts: &CookieOptions) -> Result<String> {
    let mut parts = vec![format!("{}={value}", opts.name)];
    parts.extend(common_attributes(opts)?);
    Ok(parts.join("; "))
}

/// Build a `Set-Cookie` header value that clears the cookie.
pub fn build_clear_cookie(opts: &CookieOptions) -> Result<String> {
    let mut parts = vec![format!("{}=", opts.name)];
    parts.extend(common_attributes(opts)?);
    parts.push("Max-Age=0".to_string());
    parts.push(format!("Expires={}", fmt_http_date(UNIX_EPOCH)));
    Ok(parts.join("; "))
}

/// Find a cookie by name in a `Cookie` request header value.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
}
