//! Route definitions for the `/records` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::movie_show;
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movie_show::list).post(movie_show::create))
        .route(
            "/{id}",
            get(movie_show::get_by_id)
                .put(movie_show::update)
                .delete(movie_show::delete),
        )
}
