//! SplitBill API server.
//!
//! Reads its configuration directory from `SPLITBILL_CONFIG` (default
//! `./config/splitbill`) and listens on `SPLITBILL_ADDR` (default
//! `0.0.0.0:5000`). Log filtering follows `RUST_LOG`.

use std::env;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use splitbill::api::{create_router, AppState};
use splitbill::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/splitbill";
const DEFAULT_ADDR: &str = "0.0.0.0:5000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_dir = env::var("SPLITBILL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("SPLITBILL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        groups = config.groups().len(),
        rounding = ?config.policy().rounding,
        "Configuration loaded"
    );

    let router = create_router(AppState::from_config(&config));
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, version = env!("CARGO_PKG_VERSION"), "SplitBill API listening");

    axum::serve(listener, router).await?;
    Ok(())
}
