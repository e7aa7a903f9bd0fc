// Process entry point for the Paris Connection client.

use std::sync::Arc;

use anyhow::Result;
use extraction::{Extractor, GeminiExtractor};
use gateway::{Gateway, MemoryGateway, SupabaseGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{shell, AppController, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let gateway: Arc<dyn Gateway> = match &config.storage {
        Some(storage) => Arc::new(SupabaseGateway::new(storage.clone())),
        None => {
            tracing::warn!("storage credentials missing, running in demo mode");
            Arc::new(MemoryGateway::new())
        }
    };

    let extractor: Option<Arc<dyn Extractor>> = config
        .gemini_api_key
        .as_deref()
        .map(|key| Arc::new(GeminiExtractor::new(key)) as Arc<dyn Extractor>);
    if extractor.is_none() {
        tracing::info!("extraction credential missing, AI publish disabled");
    }

    let mut controller = AppController::new(gateway, extractor);
    controller.init().await;

    shell::run(controller).await
}
