use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod advisor;
mod config;
mod error;
mod models;
mod oracle;
mod server;

use advisor::CorrectionAdvisor;
use config::Config;
use oracle::OllamaOracle;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("grammar_tutor=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config = Config::load();

    info!("🚀 Loading grammar correction oracle...");
    let oracle = OllamaOracle::new(&config.oracle.base_url, &config.oracle.model);
    let advisor = Arc::new(CorrectionAdvisor::new(Arc::new(oracle)));
    info!("✅ Correction advisor ready!");

    let app = server::router(advisor);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📡 Starting Grammar Tutor API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
