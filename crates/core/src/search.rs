//! Search and pagination constants and helpers.
//!
//! Lives in `core` so the engine, the Postgres store and the HTTP layer all
//! resolve raw query input the same way.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page used when the request omits one or sends garbage.
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of records per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Raw input resolution
// ---------------------------------------------------------------------------

/// Parse a raw query value as a non-zero integer.
///
/// Absent, non-numeric and zero values all resolve to `None`, matching the
/// "falsy means default" rule the clients rely on.
fn parse_nonzero(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n != 0)
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Resolve the `page` query parameter: default 1, negatives clamp to 1.
pub fn resolve_page(raw: Option<&str>) -> i64 {
    parse_nonzero(raw).unwrap_or(DEFAULT_PAGE).max(1)
}

/// Resolve the `limit` query parameter: default 10, clamped to `1..=100`.
pub fn resolve_limit(raw: Option<&str>) -> i64 {
    clamp_limit(parse_nonzero(raw), DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT)
}

/// Trim a free-text search term; blank input means "no search".
pub fn normalize_search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Escape `%`, `_` and `\` so a term matches literally inside `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%term%` pattern for a case-insensitive substring match.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}
