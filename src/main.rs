mod server;

use crate::server::{
    bot, config::Config, error::AppError, service::registry::ServerRegistry, startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("xui_relay=info,serenity=warn")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client(&config)?;

    let registry = ServerRegistry::new(db, http_client, config.fallback_panel.clone());
    registry.initialize().await;

    tracing::info!("Starting server");

    let client = bot::start::init_bot(&config, registry).await?;

    // Stop every shard on Ctrl+C so start_bot returns
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        tracing::info!("Shutting down Discord bot");
        shard_manager.shutdown_all().await;
    });

    bot::start::start_bot(client).await
}
