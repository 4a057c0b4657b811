//! Route definitions for topics.
//!
//! Registered under `/topics`.

use axum::routing::get;
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Topic routes, registered as `/topics`.
///
/// ```text
/// GET    /                          list_topics
/// POST   /                          create_topic
/// GET    /roots                     list_root_topics
/// GET    /path?from=&to=            find_path
/// GET    /{id}                      get_topic
/// PUT    /{id}                      update_topic
/// DELETE /{id}                      delete_topic
/// GET    /{id}/children             list_children
/// GET    /{id}/tree                 get_tree
/// GET    /{id}/versions             list_versions
/// GET    /{id}/versions/latest      get_latest_version
/// GET    /{id}/versions/{version}   get_version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list_topics).post(topics::create_topic))
        .route("/roots", get(topics::list_root_topics))
        .route("/path", get(topics::find_path))
        .route(
            "/{id}",
            get(topics::get_topic)
                .put(topics::update_topic)
                .delete(topics::delete_topic),
        )
        .route("/{id}/children", get(topics::list_children))
        .route("/{id}/tree", get(topics::get_tree))
        .route("/{id}/versions", get(topics::list_versions))
        .route("/{id}/versions/latest", get(topics::get_latest_version))
        .route("/{id}/versions/{version}", get(topics::get_version))
}
