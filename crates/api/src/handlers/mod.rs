pub mod auth;
pub mod movie_show;
