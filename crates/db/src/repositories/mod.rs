//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod movie_show_repo;
pub mod user_repo;

pub use movie_show_repo::MovieShowRepo;
pub use user_repo::UserRepo;
