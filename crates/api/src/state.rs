use std::sync::Arc;

use cinelog_core::catalog::CatalogService;
use cinelog_db::PgCatalogStore;

use crate::config::ServerConfig;
use crate::uploads::PosterStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cinelog_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Catalog query engine over the Postgres store.
    pub catalog: CatalogService,
    /// Poster upload storage.
    pub posters: PosterStorage,
}

impl AppState {
    /// Wire the catalog engine and poster storage for `pool` and `config`.
    pub fn new(pool: cinelog_db::DbPool, config: ServerConfig) -> Self {
        let catalog = CatalogService::new(Arc::new(PgCatalogStore::new(pool.clone())));
        let posters = PosterStorage::new(config.uploads_dir.clone());

        Self {
            pool,
            config: Arc::new(config),
            catalog,
            posters,
        }
    }
}
