//! List query types: filter, sort specification and the page payload.

use std::cmp::Ordering;

use serde::Serialize;

use super::model::{MediaType, MovieShow};
use crate::error::CoreError;
use crate::search::{
    normalize_search_term, resolve_limit, resolve_page, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT,
};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Which records a list query selects.
///
/// Always scoped to one owner. `search` matches title OR director OR genre as
/// a case-insensitive substring; `media_type` is ANDed with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFilter {
    pub owner: DbId,
    pub search: Option<String>,
    pub media_type: Option<MediaType>,
}

impl CatalogFilter {
    /// Owner-only filter with no search or type constraint.
    pub fn owned_by(owner: DbId) -> Self {
        Self {
            owner,
            search: None,
            media_type: None,
        }
    }

    /// Evaluate the filter against a single record.
    pub fn matches(&self, record: &MovieShow) -> bool {
        if record.owner != self.owner {
            return false;
        }
        if self.media_type.is_some_and(|t| t != record.media_type) {
            return false;
        }
        match &self.search {
            None => true,
            Some(term) => {
                let needle = term.to_lowercase();
                let hit = |s: &str| s.to_lowercase().contains(&needle);
                hit(&record.title)
                    || hit(&record.director)
                    || record.genre.as_deref().is_some_and(hit)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sort specification
// ---------------------------------------------------------------------------

/// Record fields a list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    MediaType,
    Director,
    Duration,
    Year,
    Genre,
    Rating,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Resolve a client-facing field name.
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "title" => SortField::Title,
            "type" => SortField::MediaType,
            "director" => SortField::Director,
            "duration" => SortField::Duration,
            "year" => SortField::Year,
            "genre" => SortField::Genre,
            "rating" => SortField::Rating,
            "createdAt" | "created_at" => SortField::CreatedAt,
            "updatedAt" | "updated_at" => SortField::UpdatedAt,
            _ => return None,
        };
        Some(field)
    }

    /// Column holding this field in the `movie_shows` table.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::MediaType => "media_type",
            SortField::Director => "director",
            SortField::Duration => "duration",
            SortField::Year => "year",
            SortField::Genre => "genre",
            SortField::Rating => "rating",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Ascending comparison of two records on this field.
    ///
    /// Missing optional values compare greater than any present value, the
    /// same placement PostgreSQL gives NULLs.
    fn compare(self, a: &MovieShow, b: &MovieShow) -> Ordering {
        fn nullable<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
            match (a, b) {
                (Some(x), Some(y)) => cmp(x, y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }

        match self {
            SortField::Title => a.title.cmp(&b.title),
            SortField::MediaType => a.media_type.as_str().cmp(b.media_type.as_str()),
            SortField::Director => a.director.cmp(&b.director),
            SortField::Duration => a.duration.cmp(&b.duration),
            SortField::Year => a.year.cmp(&b.year),
            SortField::Genre => nullable(a.genre.as_deref(), b.genre.as_deref(), |x, y| x.cmp(y)),
            SortField::Rating => nullable(a.rating, b.rating, |x, y| x.total_cmp(&y)),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Ordered list of sort keys. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl Default for SortSpec {
    /// Newest first.
    fn default() -> Self {
        Self {
            keys: vec![SortKey {
                field: SortField::CreatedAt,
                direction: SortDirection::Desc,
            }],
        }
    }
}

impl SortSpec {
    /// Parse a `sortBy` value such as `-createdAt` or `type, -year title`.
    ///
    /// Keys are separated by commas or whitespace; `-` means descending and
    /// `+` (or nothing) ascending. Unknown fields are skipped, repeated fields
    /// keep their first occurrence, and an empty result falls back to the
    /// default ordering.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let mut keys: Vec<SortKey> = Vec::new();
        for token in raw.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let (direction, name) = match token.strip_prefix('-') {
                Some(rest) => (SortDirection::Desc, rest),
                None => (SortDirection::Asc, token.strip_prefix('+').unwrap_or(token)),
            };
            let Some(field) = SortField::from_name(name) else {
                tracing::warn!(sort_key = %token, "Ignoring unknown sort field");
                continue;
            };
            if keys.iter().all(|k| k.field != field) {
                keys.push(SortKey { field, direction });
            }
        }

        if keys.is_empty() {
            Self::default()
        } else {
            Self { keys }
        }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compare two records by every key in order, then by ascending id.
    pub fn compare(&self, a: &MovieShow, b: &MovieShow) -> Ordering {
        self.keys
            .iter()
            .map(|key| {
                let ord = key.field.compare(a, b);
                match key.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }

    /// `ORDER BY` body, ending with the `id` tie-breaker.
    pub fn order_by_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .keys
            .iter()
            .map(|k| format!("{} {}", k.field.column(), k.direction.sql()))
            .collect();
        parts.push("id ASC".to_string());
        parts.join(", ")
    }
}

// ---------------------------------------------------------------------------
// List query
// ---------------------------------------------------------------------------

/// A fully resolved list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub media_type: Option<MediaType>,
    pub sort: SortSpec,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
            search: None,
            media_type: None,
            sort: SortSpec::default(),
        }
    }
}

impl ListQuery {
    /// Resolve raw query-string values.
    ///
    /// Pagination values fall back or clamp as described in
    /// [`crate::search`]; a non-empty `type` that is not a known media type is
    /// rejected.
    pub fn resolve(
        page: Option<&str>,
        limit: Option<&str>,
        search: Option<&str>,
        media_type: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<Self, CoreError> {
        let media_type = media_type
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<MediaType>)
            .transpose()?;

        Ok(Self {
            page: resolve_page(page),
            limit: resolve_limit(limit),
            search: normalize_search_term(search),
            media_type,
            sort: SortSpec::parse(sort_by),
        })
    }

    /// Number of records to skip before the requested page.
    ///
    /// Saturates, so an absurdly large page yields an empty result instead
    /// of an overflow.
    pub fn skip(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// The filter this query applies for `owner`.
    pub fn filter_for(&self, owner: DbId) -> CatalogFilter {
        CatalogFilter {
            owner,
            search: self.search.clone(),
            media_type: self.media_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Page payload
// ---------------------------------------------------------------------------

/// One page of a list result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub items: Vec<MovieShow>,
    pub page: i64,
    pub pages: i64,
    pub total: i64,
    pub has_more: bool,
}

impl CatalogPage {
    /// Assemble the payload for `items` fetched at `skip` out of `total`.
    pub fn new(items: Vec<MovieShow>, page: i64, limit: i64, skip: i64, total: i64) -> Self {
        let returned = i64::try_from(items.len()).unwrap_or(i64::MAX);
        Self {
            page,
            pages: page_count(total, limit),
            total,
            has_more: skip.saturating_add(returned) < total,
            items,
        }
    }
}

/// `ceil(total / limit)`; zero when there is nothing to show.
pub fn page_count(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}
