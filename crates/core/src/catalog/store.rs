//! The persistence seam the catalog engine runs against.

use async_trait::async_trait;

use super::model::{MovieShow, MovieShowInput};
use super::query::{CatalogFilter, SortSpec};
use crate::error::CoreError;
use crate::types::DbId;

/// Document-style storage for movie/show records.
///
/// Implementations report unexpected persistence failures as
/// [`CoreError::Internal`]; "not found" is expressed through `Option`/`bool`
/// return values, never as an error.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Count every record matching `filter`, ignoring pagination.
    async fn count(&self, filter: &CatalogFilter) -> Result<i64, CoreError>;

    /// Fetch records matching `filter`, ordered by `sort`, skipping `skip`
    /// and returning at most `limit`.
    async fn fetch_page(
        &self,
        filter: &CatalogFilter,
        sort: &SortSpec,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MovieShow>, CoreError>;

    /// Insert a record owned by `owner`.
    async fn insert(&self, owner: DbId, input: &MovieShowInput) -> Result<MovieShow, CoreError>;

    /// Fetch a record by id regardless of owner.
    async fn find_by_id(&self, id: DbId) -> Result<Option<MovieShow>, CoreError>;

    /// Replace every writable field of a record. `None` if it no longer exists.
    async fn replace(
        &self,
        id: DbId,
        input: &MovieShowInput,
    ) -> Result<Option<MovieShow>, CoreError>;

    /// Delete a record. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}
