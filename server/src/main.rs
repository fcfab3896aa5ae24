//! holocron-server: reads config from the environment, prepares the store, serves the API.
//!
//! `HOLOCRON_STORE=memory SEED_PATH=seed/catalog.json cargo run -p holocron-server`
//! runs without a database.

use holocron::{
    app, ensure_database_exists, AppConfig, AppState, FavoritesStore, MemoryStore, PgStore, SeedData, StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("holocron=info,tower_http=info")),
        )
        .init();

    let store: Arc<dyn FavoritesStore> = match config.store {
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            let store = PgStore::new(pool, config.schema.clone());
            store.ensure_schema().await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    if let Some(path) = &config.seed_path {
        let seed = SeedData::from_file(path).await?;
        seed.apply(store.as_ref()).await?;
    }

    let app = app(AppState::new(store));
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
