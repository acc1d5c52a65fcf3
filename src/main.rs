mod api;
mod config;
mod error;
mod filter;
mod service;
mod source;
mod state;
mod transform;
mod types;

use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::service::LotteryService;
use crate::source::{RowSource, SheetsClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Upstream spreadsheet ---
    let source: Arc<dyn RowSource> = Arc::new(SheetsClient::new(&cfg)?);
    info!(
        "Reading spreadsheet {} (realtime range: {}, daily range: {}, cache ttl: {}s)",
        cfg.spreadsheet_id, cfg.realtime_range, cfg.daily_range, cfg.cache_ttl_secs,
    );

    // --- HTTP API server ---
    let service = Arc::new(LotteryService::new(&cfg, source));
    let app = router(ApiState { service });
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server running at http://localhost:{}", cfg.api_port);

    axum::serve(listener, app).await?;

    Ok(())
}
