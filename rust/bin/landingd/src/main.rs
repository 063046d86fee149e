//! landingd — backend for the product landing page.
//!
//! Serves lead capture, browser geolocation, referral tracking and the
//! launch countdown over a single HTTP listener backed by SQLite.

mod bootstrap;
mod config;
mod countdown;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use landing_core::Module;
use landing_sql::{SQLStore, SqliteStore};
use leads::geocode::{DisabledGeocoder, Geocoder, OpenCageGeocoder};
use leads::LeadsModule;
use referral::ReferralModule;

use crate::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "landingd", about = "Landing page backend server")]
struct Cli {
    /// Config context name (resolved to /etc/landingd/<name>.toml) or a
    /// path to a TOML config file.
    #[arg(short, long)]
    config: String,

    /// Listen address.
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = ServerConfig::resolve_path(&cli.config);
    info!(path = %config_path.display(), "loading config");
    let config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&config)?;

    std::fs::create_dir_all(&config.storage.data_dir)?;
    let db_path = config.resolve_sqlite_path();
    info!(path = %db_path.display(), "opening database");
    let sql: Arc<dyn SQLStore> = Arc::new(SqliteStore::open(&db_path)?);

    let geocoder: Arc<dyn Geocoder> = if config.geocode.api_key.trim().is_empty() {
        warn!("geocode.api_key is empty, locations will be stored without a city");
        Arc::new(DisabledGeocoder)
    } else {
        Arc::new(OpenCageGeocoder::with_endpoint(
            config.geocode.api_key.clone(),
            config.geocode.endpoint.clone(),
        ))
    };

    let leads = LeadsModule::new(sql.clone(), geocoder)?;
    let referral = ReferralModule::new(sql, config.security.api_key.clone())?;
    let modules: Vec<Box<dyn Module>> = vec![Box::new(leads), Box::new(referral)];

    let app = routes::build_router(&modules, &config);

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!(addr = %cli.listen, "landingd listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("landingd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
