//! Shared query parameter types for API handlers.

use cinelog_core::catalog::query::ListQuery;
use cinelog_core::error::CoreError;
use serde::Deserialize;

/// Raw `GET /records` query string.
///
/// Everything is kept as text so malformed numbers fall back to defaults
/// instead of failing extraction; [`ListParams::resolve`] applies the policy.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

impl ListParams {
    pub fn resolve(&self) -> Result<ListQuery, CoreError> {
        ListQuery::resolve(
            self.page.as_deref(),
            self.limit.as_deref(),
            self.search.as_deref(),
            self.media_type.as_deref(),
            self.sort_by.as_deref(),
        )
    }
}
