//! The movie/show record and its validated write input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Wire names of every [`MediaType`], in declaration order.
pub const MEDIA_TYPE_NAMES: &[&str] = &["Movie", "TV Show"];

/// Whether a record describes a film or a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl MediaType {
    /// The wire and storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Movie" => Ok(MediaType::Movie),
            "TV Show" => Ok(MediaType::TvShow),
            _ => Err(CoreError::invalid_field(
                "type",
                "Type must be Movie or TV Show",
            )),
        }
    }
}

/// One catalogued movie or show, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieShow {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub director: String,
    pub budget: Option<String>,
    pub location: Option<String>,
    pub duration: String,
    pub year: i32,
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub poster: String,
    pub owner: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated field values for an insert or a replace.
///
/// Optional fields that are `None` were absent from the payload. On update
/// they are filled from the stored record by [`MovieShowInput::fill_from`].
#[derive(Debug, Clone, PartialEq)]
pub struct MovieShowInput {
    pub title: String,
    pub media_type: MediaType,
    pub director: String,
    pub budget: Option<String>,
    pub location: Option<String>,
    pub duration: String,
    pub year: i32,
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub poster: Option<String>,
}

impl MovieShowInput {
    /// Extract typed values from a payload that already passed the record
    /// schema. Anything the schema should have caught surfaces as an
    /// internal error.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, CoreError> {
        let media_type = required_text(payload, "type")?.parse()?;
        let year = payload
            .get("year")
            .and_then(Value::as_f64)
            .and_then(|y| i32::try_from(y as i64).ok())
            .ok_or_else(|| unchecked("year"))?;

        Ok(Self {
            title: required_text(payload, "title")?,
            media_type,
            director: required_text(payload, "director")?,
            budget: optional_text(payload, "budget"),
            location: optional_text(payload, "location"),
            duration: required_text(payload, "duration")?,
            year,
            genre: optional_text(payload, "genre"),
            rating: payload.get("rating").and_then(Value::as_f64),
            description: optional_text(payload, "description"),
            poster: optional_text(payload, "poster"),
        })
    }

    /// Keep stored values for every optional field the payload left out.
    pub fn fill_from(mut self, existing: &MovieShow) -> Self {
        fn keep(slot: &mut Option<String>, stored: &Option<String>) {
            if slot.is_none() {
                slot.clone_from(stored);
            }
        }
        keep(&mut self.budget, &existing.budget);
        keep(&mut self.location, &existing.location);
        keep(&mut self.genre, &existing.genre);
        keep(&mut self.description, &existing.description);
        if self.rating.is_none() {
            self.rating = existing.rating;
        }
        if self.poster.is_none() {
            self.poster = Some(existing.poster.clone());
        }
        self
    }

    /// Poster path to persist; records without one store an empty string.
    pub fn poster_or_default(&self) -> &str {
        self.poster.as_deref().unwrap_or("")
    }
}

fn unchecked(field: &str) -> CoreError {
    CoreError::Internal(format!("validated payload has no usable '{field}'"))
}

fn required_text(payload: &Map<String, Value>, field: &str) -> Result<String, CoreError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| unchecked(field))
}

fn optional_text(payload: &Map<String, Value>, field: &str) -> Option<String> {
    payload.get(field).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn stored() -> MovieShow {
        let now = Utc::now();
        MovieShow {
            id: 7,
            title: "Old".into(),
            media_type: MediaType::Movie,
            director: "Someone".into(),
            budget: Some("$10M".into()),
            location: Some("Oslo".into()),
            duration: "90 min".into(),
            year: 2001,
            genre: Some("Drama".into()),
            rating: Some(6.5),
            description: None,
            poster: "/uploads/old.png".into(),
            owner: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn media_type_round_trips_wire_names() {
        assert_eq!("TV Show".parse::<MediaType>().unwrap(), MediaType::TvShow);
        assert_eq!(MediaType::Movie.to_string(), "Movie");
        assert_eq!(json!(MediaType::TvShow), json!("TV Show"));
        assert_matches!("tv show".parse::<MediaType>(), Err(CoreError::InvalidFields(e)) if e.contains_key("type"));
    }

    #[test]
    fn record_serializes_camel_case() {
        let value = serde_json::to_value(stored()).unwrap();
        assert_eq!(value["type"], "Movie");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("media_type").is_none());
    }

    #[test]
    fn from_payload_reads_typed_values() {
        let input = MovieShowInput::from_payload(&payload(json!({
            "title": "Heat", "type": "Movie", "director": "Michael Mann",
            "duration": "170 min", "year": 1995, "rating": 8.3
        })))
        .unwrap();
        assert_eq!(input.year, 1995);
        assert_eq!(input.rating, Some(8.3));
        assert_eq!(input.genre, None);
        assert_eq!(input.poster_or_default(), "");
    }

    #[test]
    fn fill_from_keeps_absent_optionals_only() {
        let input = MovieShowInput::from_payload(&payload(json!({
            "title": "New", "type": "TV Show", "director": "Other",
            "duration": "45 min", "year": 2020, "genre": ""
        })))
        .unwrap()
        .fill_from(&stored());

        assert_eq!(input.title, "New");
        assert_eq!(input.budget.as_deref(), Some("$10M"));
        assert_eq!(input.genre.as_deref(), Some(""));
        assert_eq!(input.rating, Some(6.5));
        assert_eq!(input.poster.as_deref(), Some("/uploads/old.png"));
    }
}
