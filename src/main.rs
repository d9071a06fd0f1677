//! gsa-client demo server
//!
//! Serves a search page backed by the configured appliance.

use anyhow::Result;
use gsa_client::{
    config::Settings,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting gsa-client v{}", gsa_client::VERSION);

    // Load configuration
    let settings = load_settings()?;
    let appliance = settings.appliance_options();
    if appliance.is_searchable() {
        info!(
            "Using appliance {} ({})",
            appliance.appliance_url(),
            appliance.appliance_name()
        );
    } else {
        warn!("Appliance URL or name not configured; searches will return no results");
    }

    // Create application state
    let state = AppState::new(settings.clone())?;
    info!("Application state initialized");

    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check environment variable first
    if let Ok(path) = std::env::var("GSA_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return load_from(&path);
        }
        warn!("GSA_SETTINGS_PATH {} does not exist", path.display());
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/gsa-client/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("gsa-client/settings.yml"));
    }

    for path in paths.iter() {
        if path.exists() {
            return load_from(path);
        }
    }

    // Use defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

fn load_from(path: &Path) -> Result<Settings> {
    info!("Loading settings from: {}", path.display());
    let mut settings = Settings::from_file(path)?;
    settings.merge_env();
    Ok(settings)
}
