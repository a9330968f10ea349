use std::sync::Arc;

use anyhow::Context;
use food_catalog::{
    infrastructure::{
        config::{AppConfig, StoreConfig},
        database::MongoFoodStore,
        logger::Logger,
        memory::MemoryFoodStore,
    },
    router, FoodStore,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env files first so RUST_LOG from them applies.
    let config = AppConfig::from_env();
    Logger::init();
    let config = config.context("failed to load configuration")?;

    let store: Arc<dyn FoodStore> = match config.store {
        StoreConfig::Mongo { uri, database } => {
            info!(database = %database, "using MongoDB store");
            Arc::new(MongoFoodStore::new(uri, database))
        }
        StoreConfig::Memory => {
            warn!("using in-memory store; records are lost on exit");
            Arc::new(MemoryFoodStore::new())
        }
    };

    let app = router(store);

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    info!("food catalog listening on http://{}", config.bind_address);
    info!("   GET    /foods      - list foods");
    info!("   POST   /foods      - create food");
    info!("   PUT    /foods/:id  - update food");
    info!("   DELETE /foods/:id  - delete food");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
