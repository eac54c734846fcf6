use address_registry::{init_global, RegistryConfig};
use anyhow::Context;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt().with_max_level(Level::INFO).with_writer(std::io::stderr).init();

    let config = RegistryConfig::from_env()?;
    info!("Resolved registry config: {}", serde_json::to_string(&config)?);

    let registry = init_global(&config).await.context("failed to build address registry")?;

    info!("Registry loaded with {} addresses", registry.len());

    println!("{}", serde_json::to_string_pretty(registry)?);
    Ok(())
}
