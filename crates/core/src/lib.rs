//! Cinelog domain core.
//!
//! Pure logic with no database or HTTP dependencies: the record model, the
//! catalog query engine, the validation engine and the shared error type.

pub mod catalog;
pub mod error;
pub mod search;
pub mod types;
pub mod validation;
