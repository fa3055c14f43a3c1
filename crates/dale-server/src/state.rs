//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use dale_auth::{CookieOptions, Credentials, TokenSigner};
use dale_core::GateConfig;

/// Read-only state shared across handlers. Nothing in here changes after
/// startup, so handlers never lock.
#[derive(Clone)]
pub struct AppState {
    pub signer: TokenSigner,
    pub credentials: Arc<Credentials>,
    pub cookie: Arc<CookieOptions>,
    pub logo_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            signer: config.signer(),
            credentials: Arc::new(config.credentials()),
            cookie: Arc::new(config.cookie_options()),
            logo_path: Arc::new(config.logo_path.clone()),
        }
    }
}
