use anyhow::Context;
use static_server::{ServerConfig, StaticServer};

const CONFIG_ENV: &str = "STATIC_SERVER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "static-server.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()>{
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let cfg = ServerConfig::from_file(&path)
        .with_context(|| format!("loading configuration from {path}"))?;
    tracing::info!(root_dir = cfg.root_dir(), "Loaded configuration from {}", path);

    let server = StaticServer::new(cfg);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    server.stop().await?;

    Ok(())
}
