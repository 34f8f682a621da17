//! In-process [`CatalogStore`] backed by a map.
//!
//! Interprets [`CatalogFilter`] and [`SortSpec`] with the same semantics as
//! the PostgreSQL store, so engine tests can run without a database. Text
//! sort keys compare byte-wise here, whereas PostgreSQL uses the column
//! collation, so mixed-case or non-ASCII titles may order differently.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::model::{MovieShow, MovieShowInput};
use super::query::{CatalogFilter, SortSpec};
use super::store::CatalogStore;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<DbId, MovieShow>,
    last_id: DbId,
    last_timestamp: Option<Timestamp>,
}

impl Inner {
    /// Strictly increasing timestamps so creation order is always observable.
    fn next_timestamp(&mut self) -> Timestamp {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    inner: RwLock<Inner>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all owners.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn count(&self, filter: &CatalogFilter) -> Result<i64, CoreError> {
        let inner = self.inner.read().await;
        let count = inner.records.values().filter(|r| filter.matches(r)).count();
        i64::try_from(count).map_err(|e| CoreError::Internal(e.to_string()))
    }

    async fn fetch_page(
        &self,
        filter: &CatalogFilter,
        sort: &SortSpec,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MovieShow>, CoreError> {
        let inner = self.inner.read().await;
        let mut matched: Vec<&MovieShow> =
            inner.records.values().filter(|r| filter.matches(r)).collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn insert(&self, owner: DbId, input: &MovieShowInput) -> Result<MovieShow, CoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        let now = inner.next_timestamp();

        let record = MovieShow {
            id,
            title: input.title.clone(),
            media_type: input.media_type,
            director: input.director.clone(),
            budget: input.budget.clone(),
            location: input.location.clone(),
            duration: input.duration.clone(),
            year: input.year,
            genre: input.genre.clone(),
            rating: input.rating,
            description: input.description.clone(),
            poster: input.poster_or_default().to_string(),
            owner,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<MovieShow>, CoreError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn replace(
        &self,
        id: DbId,
        input: &MovieShowInput,
    ) -> Result<Option<MovieShow>, CoreError> {
        let mut inner = self.inner.write().await;
        if !inner.records.contains_key(&id) {
            return Ok(None);
        }
        let now = inner.next_timestamp();
        let Some(record) = inner.records.get_mut(&id) else {
            return Ok(None);
        };

        record.title.clone_from(&input.title);
        record.media_type = input.media_type;
        record.director.clone_from(&input.director);
        record.budget.clone_from(&input.budget);
        record.location.clone_from(&input.location);
        record.duration.clone_from(&input.duration);
        record.year = input.year;
        record.genre.clone_from(&input.genre);
        record.rating = input.rating;
        record.description.clone_from(&input.description);
        record.poster = input.poster_or_default().to_string();
        record.updated_at = now;

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.inner.write().await.records.remove(&id).is_some())
    }
}
