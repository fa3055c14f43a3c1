//! Process configuration for the Dale gateway.
//!
//! Values come from an optional TOML file and from the environment, the
//! environment winning. Every key has a default, so an empty environment
//! yields a runnable (if insecure) configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dale_auth::{CookieOptions, Credentials, TokenSigner};
use serde::Deserialize;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_SECRET: &str = "change-me-in-production";
pub const DEFAULT_TTL_HOURS: u64 = 24;
pub const DEFAULT_LISTEN_ADDR: &str = ":8080";
pub const DEFAULT_DOMAIN: &str = "localhost";
pub const DEFAULT_LOGO_PATH: &str = "auth.png";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid listen address {0:?}")]
    ListenAddr(String),
}

/// Immutable gateway configuration, built once at startup.
#[derive(Clone)]
pub struct GateConfig {
    pub username: String,
    pub password: String,
    pub secret: String,
    pub token_ttl: Duration,
    /// `host:port` handed to the listener as is; hostnames resolve at bind.
    pub listen_addr: String,
    /// Cookie `Domain`, the configured domain with a leading dot.
    pub cookie_domain: String,
    pub cookie_secure: bool,
    pub logo_path: PathBuf,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("username", &self.username)
            .field("token_ttl", &self.token_ttl)
            .field("listen_addr", &self.listen_addr)
            .field("cookie_domain", &self.cookie_domain)
            .field("cookie_secure", &self.cookie_secure)
            .field("logo_path", &self.logo_path)
            .finish_non_exhaustive()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            secret: DEFAULT_SECRET.to_string(),
            token_ttl: Duration::from_secs(DEFAULT_TTL_HOURS * 3600),
            listen_addr: format!("[::]{DEFAULT_LISTEN_ADDR}"),
            cookie_domain: cookie_domain(DEFAULT_DOMAIN),
            cookie_secure: false,
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
        }
    }
}

/// On-disk form. Every key is optional; env overrides each one.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub secret: Option<String>,
    pub token_ttl_hours: Option<i64>,
    pub listen_addr: Option<String>,
    pub domain: Option<String>,
    pub cookie_secure: Option<bool>,
    pub logo_path: Option<PathBuf>,
}

impl GateConfig {
    /// Load from `path` (if any) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let raw = match path {
            Some(path) => load_raw_from_file(path)?,
            None => RawConfig::default(),
        };
        Self::from_sources(raw, |key| std::env::var(key).ok())
    }

    /// Merge file values with values from `lookup`. Empty lookup values
    /// count as unset.
    pub fn from_sources<F>(raw: RawConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let username = env("USERNAME")
            .or(raw.username)
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = env("PASSWORD")
            .or(raw.password)
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());
        let secret = env("SECRET")
            .or(raw.secret)
            .unwrap_or_else(|| DEFAULT_SECRET.to_string());

        let ttl_hours = match env("TOKEN_TTL_HOURS") {
            Some(v) => parse_ttl_hours(&v),
            None => raw
                .token_ttl_hours
                .map_or(DEFAULT_TTL_HOURS, |h| parse_ttl_hours(&h.to_string())),
        };

        let listen_addr = env("LISTEN_ADDR")
            .or(raw.listen_addr)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = normalize_listen_addr(&listen_addr)?;

        let domain = env("DOMAIN")
            .or(raw.domain)
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());

        let cookie_secure = match env("COOKIE_SECURE") {
            Some(v) => v.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %v, "invalid COOKIE_SECURE, using false");
                false
            }),
            None => raw.cookie_secure.unwrap_or(false),
        };

        let logo_path = env("LOGO_PATH")
            .map(PathBuf::from)
            .or(raw.logo_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGO_PATH));

        Ok(Self {
            username,
            password,
            secret,
            token_ttl: Duration::from_secs(ttl_hours.saturating_mul(3600)),
            listen_addr,
            cookie_domain: cookie_domain(&domain),
            cookie_secure,
            logo_path,
        })
    }

    /// True when the signing secret was left at its default.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub fn signer(&self) -> TokenSigner {
        TokenSigner::new(&self.secret, self.token_ttl)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    pub fn cookie_options(&self) -> CookieOptions {
        CookieOptions::session(&self.cookie_domain, self.cookie_secure)
    }
}

pub fn load_raw_from_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Whole hours, at least one. Anything else falls back to the default.
fn parse_ttl_hours(value: &str) -> u64 {
    match value.trim().parse::<u64>() {
        Ok(hours) if hours > 0 => hours,
        _ => {
            tracing::warn!(
                value,
                default = DEFAULT_TTL_HOURS,
                "invalid TOKEN_TTL_HOURS, using default"
            );
            DEFAULT_TTL_HOURS
        }
    }
}

/// Accepts `host:port` (host may be a name, an IPv4 address or a bracketed
/// IPv6 address) or `:port`, which becomes `[::]:port` (all interfaces).
///
/// Only the shape and the port are checked here; names resolve at bind time.
pub fn normalize_listen_addr(value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let err = || ConfigError::ListenAddr(value.to_string());

    let (host, port) = value.rsplit_once(':').ok_or_else(err)?;
    port.parse::<u16>().map_err(|_| err())?;

    if host.is_empty() {
        return Ok(format!("[::]:{port}"));
    }
    if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
        return Err(err());
    }
    Ok(value.to_string())
}

/// `example.com` becomes `.example.com` so subdomains share the cookie.
pub fn cookie_domain(domain: &str) -> String {
    format!(".{}", domain.trim().trim_start_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = GateConfig::from_sources(RawConfig::default(), lookup(&[])).unwrap();
        assert_eq!(cfg.username, "admin");
        assert_eq!(cfg.password, "password");
        assert!(cfg.uses_default_secret());
        assert_eq!(cfg.token_ttl, Duration::from_secs(86_400));
        assert_eq!(cfg.listen_addr, "[::]:8080");
        assert_eq!(cfg.cookie_domain, ".localhost");
        assert!(!cfg.cookie_secure);
    }

    #[test]
    fn env_values_apply() {
        let cfg = GateConfig::from_sources(
            RawConfig::default(),
            lookup(&[
                ("USERNAME", "ops"),
                ("SECRET", "s3cret"),
                ("TOKEN_TTL_HOURS", "2"),
                ("LISTEN_ADDR", "127.0.0.1:9000"),
                ("DOMAIN", "example.com"),
                ("COOKIE_SECURE", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.username, "ops");
        assert_eq!(cfg.secret, "s3cret");
        assert_eq!(cfg.token_ttl, Duration::from_secs(7200));
        assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
        assert_eq!(cfg.cookie_domain, ".example.com");
        assert!(cfg.cookie_secure);
    }

    #[test]
    fn invalid_ttl_falls_back() {
        for bad in ["abc", "0", "-3", "1.5"] {
            let cfg = GateConfig::from_sources(
                RawConfig::default(),
                lookup(&[("TOKEN_TTL_HOURS", bad)]),
            )
            .unwrap();
            assert_eq!(cfg.token_ttl, Duration::from_secs(86_400), "{bad}");
        }

        for hours in [0, -5] {
            let raw = RawConfig {
                token_ttl_hours: Some(hours),
                ..RawConfig::default()
            };
            let cfg = GateConfig::from_sources(raw, lookup(&[])).unwrap();
            assert_eq!(cfg.token_ttl, Duration::from_secs(86_400), "file {hours}");
        }
    }

    #[test]
    fn invalid_cookie_secure_is_false() {
        for bad in ["yes", "1", "TRUE "] {
            let cfg = GateConfig::from_sources(
                RawConfig::default(),
                lookup(&[("COOKIE_SECURE", bad)]),
            )
            .unwrap();
            assert!(!cfg.cookie_secure, "{bad}");
        }

        let raw = RawConfig {
            cookie_secure: Some(true),
            ..RawConfig::default()
        };
        let cfg = GateConfig::from_sources(raw, lookup(&[("COOKIE_SECURE", "nope")])).unwrap();
        assert!(!cfg.cookie_secure);
    }

    #[test]
    fn empty_env_counts_as_unset() {
        let cfg =
            GateConfig::from_sources(RawConfig::default(), lookup(&[("USERNAME", "")])).unwrap();
        assert_eq!(cfg.username, "admin");
    }

    #[test]
    fn env_overrides_file() {
        let raw: RawConfig = toml::from_str(
            r#"
            username = "file-user"
            password = "file-pass"
            token_ttl_hours = 12
            domain = "file.example"
            "#,
        )
        .unwrap();
        let cfg = GateConfig::from_sources(raw, lookup(&[("USERNAME", "env-user")])).unwrap();
        assert_eq!(cfg.username, "env-user");
        assert_eq!(cfg.password, "file-pass");
        assert_eq!(cfg.token_ttl, Duration::from_secs(12 * 3600));
        assert_eq!(cfg.cookie_domain, ".file.example");
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(toml::from_str::<RawConfig>("colour = \"blue\"").is_err());
    }

    #[test]
    fn listen_addr_forms() {
        assert_eq!(normalize_listen_addr(":8080").unwrap(), "[::]:8080");
        assert_eq!(normalize_listen_addr("localhost:3000").unwrap(), "localhost:3000");
        assert_eq!(normalize_listen_addr("0.0.0.0:80").unwrap(), "0.0.0.0:80");
        assert_eq!(normalize_listen_addr("[::1]:8080").unwrap(), "[::1]:8080");
        assert!(matches!(
            normalize_listen_addr("nonsense"),
            Err(ConfigError::ListenAddr(_))
        ));
        assert!(normalize_listen_addr(":99999").is_err());
        assert!(normalize_listen_addr("::1:8080").is_err());
    }

    #[test]
    fn hostname_listen_addr_is_kept() {
        let cfg = GateConfig::from_sources(
            RawConfig::default(),
            lookup(&[("LISTEN_ADDR", "auth:8080")]),
        )
        .unwrap();
        assert_eq!(cfg.listen_addr, "auth:8080");
    }

    #[test]
    fn debug_hides_secrets() {
        let cfg = GateConfig {
            password: "hunter2".to_string(),
            secret: "topsecret".to_string(),
            ..GateConfig::default()
        };
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(!dbg.contains("topsecret"));
    }

    #[test]
    fn cookie_domain_has_single_dot() {
        assert_eq!(cookie_domain("example.com"), ".example.com");
        assert_eq!(cookie_domain(".example.com"), ".example.com");
    }
}
