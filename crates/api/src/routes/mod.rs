pub mod health;
pub mod topics;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /me                                              resolved principal
///
/// /topics                                          list, create
/// /topics/roots                                    root-level topics
/// /topics/path?from=&to=                           shortest path
/// /topics/{id}                                     get, update, delete
/// /topics/{id}/children                            direct children
/// /topics/{id}/tree                                nested subtree
/// /topics/{id}/versions                            version chain
/// /topics/{id}/versions/latest                     latest version
/// /topics/{id}/versions/{version}                  specific version
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::auth::me))
        .nest("/topics", topics::router())
}
