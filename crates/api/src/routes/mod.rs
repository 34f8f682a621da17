pub mod auth;
pub mod health;
pub mod movie_show;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/me                       current user (requires auth)
///
/// /records                       list, create (requires auth)
/// /records/{id}                  get, update, delete (owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/records", movie_show::router())
}
