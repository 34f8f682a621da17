//! Repository for the `movie_shows` table.

use cinelog_core::catalog::model::MovieShowInput;
use cinelog_core::catalog::query::{CatalogFilter, SortSpec};
use cinelog_core::search::contains_pattern;
use cinelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie_show::MovieShowRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, media_type, director, budget, location, \
                       duration, year, genre, rating, description, poster, \
                       created_at, updated_at";

/// Provides CRUD and filtered listing for movie/show records.
pub struct MovieShowRepo;

/// Build the `WHERE` clause for `filter`.
///
/// Returns the clause and the next free positional bind index. Binds must be
/// applied in this order: owner, search pattern (if any), media type (if any).
fn where_clause(filter: &CatalogFilter) -> (String, u32) {
    let mut conditions = vec!["owner_id = $1".to_string()];
    let mut bind_idx = 2u32;

    if filter.search.is_some() {
        conditions.push(format!(
            "(title ILIKE ${bind_idx} OR director ILIKE ${bind_idx} OR genre ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
    }
    if filter.media_type.is_some() {
        conditions.push(format!("media_type = ${bind_idx}"));
        bind_idx += 1;
    }

    (format!("WHERE {}", conditions.join(" AND ")), bind_idx)
}

impl MovieShowRepo {
    /// Insert a new record owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &MovieShowInput,
    ) -> Result<MovieShowRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_shows (\
                owner_id, title, media_type, director, budget, location, \
                duration, year, genre, rating, description, poster\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieShowRow>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(input.media_type.as_str())
            .bind(&input.director)
            .bind(input.budget.as_deref())
            .bind(input.location.as_deref())
            .bind(&input.duration)
            .bind(input.year)
            .bind(input.genre.as_deref())
            .bind(input.rating)
            .bind(input.description.as_deref())
            .bind(input.poster_or_default())
            .fetch_one(pool)
            .await
    }

    /// Find a record by ID, whoever owns it.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MovieShowRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movie_shows WHERE id = $1");
        sqlx::query_as::<_, MovieShowRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count records matching `filter`.
    pub async fn count(pool: &PgPool, filter: &CatalogFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM movie_shows {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query).bind(filter.owner);
        if let Some(ref term) = filter.search {
            q = q.bind(contains_pattern(term));
        }
        if let Some(media_type) = filter.media_type {
            q = q.bind(media_type.as_str());
        }
        q.fetch_one(pool).await
    }

    /// List one page of records matching `filter`, ordered by `sort`.
    pub async fn list_page(
        pool: &PgPool,
        filter: &CatalogFilter,
        sort: &SortSpec,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MovieShowRow>, sqlx::Error> {
        let (where_clause, bind_idx) = where_clause(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM movie_shows \
             {where_clause} \
             ORDER BY {order_by} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            order_by = sort.order_by_sql(),
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, MovieShowRow>(&query).bind(filter.owner);
        if let Some(ref term) = filter.search {
            q = q.bind(contains_pattern(term));
        }
        if let Some(media_type) = filter.media_type {
            q = q.bind(media_type.as_str());
        }

        q = q.bind(limit).bind(offset);
        q.fetch_all(pool).await
    }

    /// Overwrite every writable column of a record. `updated_at` is bumped
    /// by the table trigger.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &MovieShowInput,
    ) -> Result<Option<MovieShowRow>, sqlx::Error> {
        let query = format!(
            "UPDATE movie_shows SET \
                title = $2, media_type = $3, director = $4, budget = $5, \
                location = $6, duration = $7, year = $8, genre = $9, \
                rating = $10, description = $11, poster = $12 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieShowRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.media_type.as_str())
            .bind(&input.director)
            .bind(input.budget.as_deref())
            .bind(input.location.as_deref())
            .bind(&input.duration)
            .bind(input.year)
            .bind(input.genre.as_deref())
            .bind(input.rating)
            .bind(input.description.as_deref())
            .bind(input.poster_or_default())
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a record by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_shows WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
