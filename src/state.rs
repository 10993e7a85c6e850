use std::env;
use std::sync::Arc;

use tracing::warn;

use crate::assets::{AssetStore, LocalAssetStore};
use crate::config::auth::AuthConfig;
use crate::config::cors::CorsConfig;
use crate::config::storage::StorageConfig;
use crate::store::{MemoryStore, PgStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub assets: Arc<dyn AssetStore>,
    pub auth_config: AuthConfig,
    pub cors_config: CorsConfig,
}

/// Build the shared state from the environment. Without `DATABASE_URL` the
/// app falls back to the in-memory store, which loses everything on restart.
pub async fn init_app_state() -> AppState {
    let store: Arc<dyn Store> = match env::var("DATABASE_URL") {
        Ok(database_url) => Arc::new(
            PgStore::connect(&database_url)
                .await
                .expect("Failed to initialize database store"),
        ),
        Err(_) => {
            warn!("DATABASE_URL is not set, using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    AppState {
        store,
        assets: Arc::new(LocalAssetStore::from_config(&StorageConfig::from_env())),
        auth_config: AuthConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
