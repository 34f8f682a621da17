//! Concrete schemas for the payloads the API accepts.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::{RuleKind, Schema, ValueKind};
use crate::catalog::model::MEDIA_TYPE_NAMES;

/// Earliest accepted release year.
pub const MIN_YEAR: i32 = 1800;

/// How many years past the current one a release year may be.
pub const FUTURE_YEAR_MARGIN: i32 = 5;

/// Lowest and highest accepted rating.
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Minimum lengths for account fields.
pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Schema for a movie/show record payload.
///
/// `current_year` bounds the release year (`MIN_YEAR ..= current_year + 5`);
/// callers pass the current UTC year so tests can pin it.
pub fn movie_show_schema(current_year: i32) -> Schema {
    let text = RuleKind::TypeCheck(ValueKind::Text);

    Schema::new()
        .rule("title", RuleKind::Required, "Title is required")
        .rule("title", text.clone(), "Title must be text")
        .rule("type", RuleKind::Required, "Type is required")
        .rule(
            "type",
            RuleKind::EnumValues(MEDIA_TYPE_NAMES),
            "Type must be Movie or TV Show",
        )
        .rule("director", RuleKind::Required, "Director is required")
        .rule("director", text.clone(), "Director must be text")
        .rule("budget", text.clone(), "Budget must be text")
        .rule("location", text.clone(), "Location must be text")
        .rule("duration", RuleKind::Required, "Duration is required")
        .rule("duration", text.clone(), "Duration must be text")
        .rule("year", RuleKind::Required, "Year is required")
        .rule(
            "year",
            RuleKind::TypeCheck(ValueKind::Integer),
            "Year must be a whole number",
        )
        .rule(
            "year",
            RuleKind::MinValue(f64::from(MIN_YEAR)),
            format!("Year must be after {MIN_YEAR}"),
        )
        .rule(
            "year",
            RuleKind::MaxValue(f64::from(current_year + FUTURE_YEAR_MARGIN)),
            "Year cannot be too far in the future",
        )
        .rule("genre", text.clone(), "Genre must be text")
        .rule(
            "rating",
            RuleKind::TypeCheck(ValueKind::Number),
            "Rating must be a number",
        )
        .rule(
            "rating",
            RuleKind::MinValue(MIN_RATING),
            "Rating must be at least 0",
        )
        .rule(
            "rating",
            RuleKind::MaxValue(MAX_RATING),
            "Rating must be at most 10",
        )
        .rule("description", text.clone(), "Description must be text")
        .rule("poster", text, "Poster must be text")
}

/// Schema for `POST /auth/register`.
pub fn register_schema() -> Schema {
    let text = RuleKind::TypeCheck(ValueKind::Text);

    Schema::new()
        .rule("name", RuleKind::Required, "Name is required")
        .rule("name", text.clone(), "Name must be text")
        .rule(
            "name",
            RuleKind::MinLength(MIN_NAME_LENGTH),
            format!("Name must be at least {MIN_NAME_LENGTH} characters"),
        )
        .rule("email", RuleKind::Required, "Email is required")
        .rule("email", text.clone(), "Invalid email format")
        .rule("email", RuleKind::Pattern(EMAIL_RE.clone()), "Invalid email format")
        .rule("password", RuleKind::Required, "Password is required")
        .rule("password", text, "Password must be text")
        .rule(
            "password",
            RuleKind::MinLength(MIN_PASSWORD_LENGTH),
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        )
}

/// Schema for `POST /auth/login`.
pub fn login_schema() -> Schema {
    Schema::new()
        .rule("email", RuleKind::Required, "Email is required")
        .rule("email", RuleKind::TypeCheck(ValueKind::Text), "Invalid email format")
        .rule("email", RuleKind::Pattern(EMAIL_RE.clone()), "Invalid email format")
        .rule("password", RuleKind::Required, "Password is required")
        .rule(
            "password",
            RuleKind::TypeCheck(ValueKind::Text),
            "Password must be text",
        )
}
