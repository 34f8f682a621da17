//! Catalog query engine.
//!
//! - [`model`] -- the movie/show record and its validated write input.
//! - [`query`] -- filter, sort specification, list query and page payload.
//! - [`store`] -- the [`CatalogStore`] persistence seam.
//! - [`memory`] -- an in-process store.
//! - [`service`] -- [`CatalogService`], the owner-scoped operations.

pub mod memory;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use memory::MemoryCatalogStore;
pub use model::{MediaType, MovieShow, MovieShowInput};
pub use query::{CatalogFilter, CatalogPage, ListQuery, SortDirection, SortField, SortSpec};
pub use service::CatalogService;
pub use store::CatalogStore;

/// Entity name used in not-found errors.
pub const ENTITY: &str = "MovieShow";
