//! Postgres-backed [`CatalogStore`].

use async_trait::async_trait;
use cinelog_core::catalog::model::{MovieShow, MovieShowInput};
use cinelog_core::catalog::query::{CatalogFilter, SortSpec};
use cinelog_core::catalog::store::CatalogStore;
use cinelog_core::error::CoreError;
use cinelog_core::types::DbId;

use crate::models::movie_show::MovieShowRow;
use crate::repositories::MovieShowRepo;
use crate::DbPool;

/// Runs the catalog engine against the `movie_shows` table.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Log a database failure and surface it as an opaque internal error.
fn internal(op: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(error = %err, op, "Catalog store query failed");
        CoreError::Internal(format!("catalog store {op} failed"))
    }
}

fn convert_all(rows: Vec<MovieShowRow>) -> Result<Vec<MovieShow>, CoreError> {
    rows.into_iter().map(MovieShow::try_from).collect()
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn count(&self, filter: &CatalogFilter) -> Result<i64, CoreError> {
        MovieShowRepo::count(&self.pool, filter)
            .await
            .map_err(internal("count"))
    }

    async fn fetch_page(
        &self,
        filter: &CatalogFilter,
        sort: &SortSpec,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MovieShow>, CoreError> {
        let rows = MovieShowRepo::list_page(&self.pool, filter, sort, skip, limit)
            .await
            .map_err(internal("fetch_page"))?;
        convert_all(rows)
    }

    async fn insert(&self, owner: DbId, input: &MovieShowInput) -> Result<MovieShow, CoreError> {
        MovieShowRepo::create(&self.pool, owner, input)
            .await
            .map_err(internal("insert"))?
            .try_into()
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<MovieShow>, CoreError> {
        MovieShowRepo::find_by_id(&self.pool, id)
            .await
            .map_err(internal("find_by_id"))?
            .map(MovieShow::try_from)
            .transpose()
    }

    async fn replace(
        &self,
        id: DbId,
        input: &MovieShowInput,
    ) -> Result<Option<MovieShow>, CoreError> {
        MovieShowRepo::replace(&self.pool, id, input)
            .await
            .map_err(internal("replace"))?
            .map(MovieShow::try_from)
            .transpose()
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        MovieShowRepo::delete(&self.pool, id)
            .await
            .map_err(internal("delete"))
    }
}
