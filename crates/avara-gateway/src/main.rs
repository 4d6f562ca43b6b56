//! # avara-gateway
//!
//! AVARA USSD gateway server binary — wires together all crates and starts
//! the HTTP server.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use avara_providers::{HttpSmsClient, SessionNotifier, SmsSender, StkPushClient};
use avara_server::{ServerConfig, UssdServer};
use avara_store::ConnectionConfig;
use avara_ussd::Dispatcher;

/// AVARA USSD gateway server.
#[derive(Parser, Debug)]
#[command(name = "avara-gateway", about = "AVARA USSD gateway server")]
struct Cli {
    /// Host to bind (overrides settings if specified).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings if specified; 0 for auto-assign).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the `SQLite` ticket database.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

impl Cli {
    fn default_db_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(".avara").join("tickets.db")
    }
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Settings: file (if any) merged over defaults, env vars on top.
    let settings_path = avara_settings::loader::settings_path();
    let settings =
        avara_settings::loader::load_settings_from_path(&settings_path).unwrap_or_default();

    // Ticket database.
    let db_path = args
        .db_path
        .or_else(|| settings.server.db_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(Cli::default_db_path);
    ensure_parent_dir(&db_path)?;
    let db_str = db_path.to_string_lossy();
    let pool = avara_store::new_file(&db_str, &ConnectionConfig::default())
        .context("Failed to open database")?;
    {
        let conn = pool.get().context("Failed to get DB connection")?;
        let version = avara_store::run_migrations(&conn).context("Failed to run migrations")?;
        tracing::info!(db = %db_path.display(), schema_version = version, "database ready");
    }

    // Payment provider. Missing keys are a hard error: every purchase
    // would fail, so refuse to start instead.
    let payment = StkPushClient::from_settings(&settings.payment)
        .context("Payment provider not configured (set INTASEND_PUBLIC_KEY and INTASEND_SECRET_KEY)")?;

    // SMS is optional.
    let notifier = if settings.sms.is_configured() {
        let sms = HttpSmsClient::from_settings(&settings.sms)
            .context("Failed to build SMS client")?;
        SessionNotifier::new(Arc::new(sms) as Arc<dyn SmsSender>)
    } else {
        SessionNotifier::disabled()
    };

    let dispatcher = Arc::new(Dispatcher::new(pool, Arc::new(payment)));
    let config = ServerConfig {
        host: args.host.unwrap_or(settings.server.host),
        port: args.port.unwrap_or(settings.server.port),
    };
    let server = UssdServer::new(config, dispatcher, Arc::new(notifier));

    let (addr, handle) = server.listen().await.context("Failed to bind server")?;
    tracing::info!("AVARA gateway listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().shutdown();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
