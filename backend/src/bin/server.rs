//! Schedule Chart HTTP Server Binary
//!
//! This is the main entry point for the schedule chart web server.
//! It loads configuration, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin schedule-chart-server
//!
//! # Custom port and output directory
//! PORT=9000 CHART_OUTPUT_DIR=/tmp/charts cargo run --bin schedule-chart-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `CHART_OUTPUT_DIR`: Directory for generated charts (default: generated_charts)
//! - `CHART_STATIC_DIR`: Directory of static assets (default: static)
//! - `CHART_MEASURE_TEXT`: Fit labels by measuring text (default: true)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use schedule_chart::config::AppConfig;
use schedule_chart::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting schedule chart server");

    let config = AppConfig::load()?;
    info!(
        "Charts are written to {} (label measurement: {})",
        config.storage.output_dir.display(),
        config.chart.measure_text
    );
    std::fs::create_dir_all(&config.storage.output_dir)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState::new(config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
