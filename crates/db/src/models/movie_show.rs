//! Movie/show row model.
//!
//! The API-facing record type lives in `cinelog_core::catalog::model`; this
//! row mirrors the table and converts into it.

use cinelog_core::catalog::model::MovieShow;
use cinelog_core::error::CoreError;
use cinelog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `movie_shows` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieShowRow {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub media_type: String,
    pub director: String,
    pub budget: Option<String>,
    pub location: Option<String>,
    pub duration: String,
    pub year: i32,
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub poster: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<MovieShowRow> for MovieShow {
    type Error = CoreError;

    fn try_from(row: MovieShowRow) -> Result<Self, Self::Error> {
        let media_type = row.media_type.parse().map_err(|_| {
            CoreError::Internal(format!(
                "movie_shows row {} has unknown media_type '{}'",
                row.id, row.media_type
            ))
        })?;

        Ok(MovieShow {
            id: row.id,
            title: row.title,
            media_type,
            director: row.director,
            budget: row.budget,
            location: row.location,
            duration: row.duration,
            year: row.year,
            genre: row.genre,
            rating: row.rating,
            description: row.description,
            poster: row.poster,
            owner: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
