//! The catalog query engine: owner-scoped listing plus ownership-checked
//! read, write and delete over a [`CatalogStore`].

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde_json::{Map, Value};

use super::model::{MovieShow, MovieShowInput};
use super::query::{CatalogPage, ListQuery};
use super::store::CatalogStore;
use super::ENTITY;
use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{evaluate, normalize, schemas::movie_show_schema};

/// Message returned when a requester touches a record they do not own.
pub const NOT_OWNER_MESSAGE: &str = "Not authorized to access this record";

/// Stateless service over a shared store. Cheap to clone.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// One page of `owner`'s records matching `query`.
    pub async fn list(&self, owner: DbId, query: &ListQuery) -> Result<CatalogPage, CoreError> {
        let filter = query.filter_for(owner);
        let skip = query.skip();

        let total = self.store.count(&filter).await?;
        let items = self
            .store
            .fetch_page(&filter, &query.sort, skip, query.limit)
            .await?;

        tracing::debug!(
            user_id = owner,
            page = query.page,
            limit = query.limit,
            total,
            returned = items.len(),
            "Listed records"
        );

        Ok(CatalogPage::new(items, query.page, query.limit, skip, total))
    }

    /// Fetch a record the requester owns.
    ///
    /// A missing id is `NotFound` for everyone; an existing record owned by
    /// someone else is `Forbidden`.
    pub async fn get(&self, requester: DbId, id: DbId) -> Result<MovieShow, CoreError> {
        self.fetch_owned(requester, id).await
    }

    /// Validate `payload` and store it as a new record owned by `requester`.
    ///
    /// `poster`, when present, is the stored path of an uploaded file and
    /// takes precedence over any `poster` value in the payload.
    pub async fn create(
        &self,
        requester: DbId,
        payload: Map<String, Value>,
        poster: Option<String>,
    ) -> Result<MovieShow, CoreError> {
        let mut input = validate_payload(payload)?;
        if poster.is_some() {
            input.poster = poster;
        }

        let record = self.store.insert(requester, &input).await?;
        tracing::info!(user_id = requester, record_id = record.id, "Record created");
        Ok(record)
    }

    /// Re-validate `payload` in full and replace the requester's record.
    ///
    /// Optional fields missing from the payload keep their stored values.
    pub async fn update(
        &self,
        requester: DbId,
        id: DbId,
        payload: Map<String, Value>,
        poster: Option<String>,
    ) -> Result<MovieShow, CoreError> {
        let existing = self.fetch_owned(requester, id).await?;

        let mut input = validate_payload(payload)?;
        if poster.is_some() {
            input.poster = poster;
        }
        let input = input.fill_from(&existing);

        let record = self
            .store
            .replace(id, &input)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
        tracing::info!(user_id = requester, record_id = id, "Record updated");
        Ok(record)
    }

    /// Delete the requester's record.
    pub async fn delete(&self, requester: DbId, id: DbId) -> Result<(), CoreError> {
        self.fetch_owned(requester, id).await?;

        if !self.store.delete(id).await? {
            return Err(CoreError::NotFound { entity: ENTITY, id });
        }
        tracing::info!(user_id = requester, record_id = id, "Record deleted");
        Ok(())
    }

    async fn fetch_owned(&self, requester: DbId, id: DbId) -> Result<MovieShow, CoreError> {
        let record = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

        if record.owner != requester {
            tracing::warn!(user_id = requester, record_id = id, "Ownership check failed");
            return Err(CoreError::Forbidden(NOT_OWNER_MESSAGE.into()));
        }
        Ok(record)
    }
}

/// Normalize and validate a record payload against this year's schema.
fn validate_payload(payload: Map<String, Value>) -> Result<MovieShowInput, CoreError> {
    let schema = movie_show_schema(Utc::now().year());
    let payload = normalize(&schema, payload);

    let result = evaluate(&schema, &payload);
    if !result.is_valid {
        return Err(CoreError::InvalidFields(result.into_field_errors()));
    }
    MovieShowInput::from_payload(&payload)
}
