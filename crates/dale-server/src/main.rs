//! dale-server
//!
//! Runs the gateway, or mints and inspects tokens with the configured secret.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dale_auth::{Token, now_unix};
use dale_core::{GateConfig, normalize_listen_addr};
use dale_server::{AppState, bind_listener, router};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "dale-server", about = "Dale auth gateway: token issuance and /check")]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    /// Optional TOML config file; environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve HTTP (default)
    Serve {
        /// Override LISTEN_ADDR, e.g. ":8080" or "127.0.0.1:9000"
        #[arg(long)]
        listen: Option<String>,
    },
    /// Mint a token for an identity with the configured secret and TTL
    Mint { identity: String },
    /// Decode a token and report whether it is currently valid
    Inspect { token: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dale_server=info,dale_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = GateConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve { listen: None }) {
        Commands::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen_addr = normalize_listen_addr(&listen)?;
            }
            serve(config).await
        }
        Commands::Mint { identity } => cmd_mint(&config, &identity, cli.json),
        Commands::Inspect { token } => cmd_inspect(&config, &token, cli.json),
    }
}

async fn serve(config: GateConfig) -> anyhow::Result<()> {
    if config.uses_default_secret() {
        tracing::warn!("SECRET is the built-in default; set SECRET before exposing this service");
    }
    if let Err(err) = dale_auth::validate_identity(&config.username) {
        tracing::warn!(error = %err, "configured USERNAME cannot be carried in a token; logins will fail");
    }

    tracing::info!(addr = %config.listen_addr, "starting auth service");
    tracing::info!(ttl = ?config.token_ttl, "token TTL");
    tracing::info!(domain = %config.cookie_domain, secure = config.cookie_secure, "cookie domain");

    let app = router(AppState::new(&config));

    let listener = bind_listener(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("auth service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn cmd_mint(config: &GateConfig, identity: &str, json: bool) -> anyhow::Result<()> {
    let token = config.signer().sign(identity)?;
    if json {
        let value = serde_json::json!({
            "identity": identity,
            "access_token": token,
            "expires_in": config.signer().expires_in(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{token}");
    }
    Ok(())
}

fn cmd_inspect(config: &GateConfig, token: &str, json: bool) -> anyhow::Result<()> {
    let decoded = Token::decode(token)?;
    let now = now_unix();
    let status = match config.signer().check_at(token, now) {
        Ok(_) => "valid".to_string(),
        Err(err) => err.to_string(),
    };

    if json {
        let value = serde_json::json!({
            "identity": decoded.identity,
            "expiry": decoded.expiry,
            "expires_in": decoded.expiry - now,
            "status": status,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("identity:   {}", decoded.identity);
        println!("expiry:     {} ({:+}s)", decoded.expiry, decoded.expiry - now);
        println!("status:     {status}");
    }
    Ok(())
}
