use std::sync::Arc;

use sqlx::PgPool;

use tutorhub_auth::TokenService;
use tutorhub_config::{AppConfig, CorsConfig, DatabaseConfig, JwtConfig, StorageConfig};
use tutorhub_core::{FileStorage, LocalFileStorage};
use tutorhub_db::{init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
    pub storage: Arc<dyn FileStorage>,
    pub storage_config: StorageConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Assemble state from already-built parts.
    pub fn new(
        db: PgPool,
        tokens: TokenService,
        storage: Arc<dyn FileStorage>,
        storage_config: StorageConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            db,
            tokens,
            storage,
            storage_config,
            cors_config,
        }
    }
}

/// Connect, migrate and build the shared state from the environment.
pub async fn init_app_state(app_config: &AppConfig) -> anyhow::Result<AppState> {
    let db = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&db).await?;

    let storage_config = StorageConfig::from_env();
    let storage = LocalFileStorage::with_max_size(
        storage_config.upload_dir.clone(),
        storage_config.public_url(&app_config.public_base_url),
        storage_config.max_thumbnail_bytes,
    );

    Ok(AppState::new(
        db,
        TokenService::new(&JwtConfig::from_env()),
        Arc::new(storage),
        storage_config,
        CorsConfig::from_env(),
    ))
}
