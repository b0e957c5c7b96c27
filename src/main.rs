use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use travelchat::{ChatService, TravelChatConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = TravelChatConfig::load_from_path(config_path)?;

    telemetry::init(&config.logging)?;
    tracing::info!("Starting TravelChat {}", travelchat::VERSION);

    let service = Arc::new(ChatService::from_config(&config)?);
    web::run(&config.server, service).await
}
