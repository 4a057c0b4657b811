//! Handlers for topic CRUD, version history, trees, and paths.
//!
//! Every handler delegates to [`SecureTopicService`](topicvault_service::SecureTopicService)
//! with the authenticated principal; permission decisions are never made here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use topicvault_core::error::CoreError;
use topicvault_core::topic::Topic;
use topicvault_core::types::DbId;
use topicvault_db::models::topic::{CreateTopic, UpdateTopic};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Query param types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct PathParams {
    pub from: DbId,
    pub to: DbId,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn found<T>(value: Option<T>, id: DbId) -> AppResult<T> {
    value.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Topic",
        id,
    }))
}

/* --------------------------------------------------------------------------
Topic CRUD
-------------------------------------------------------------------------- */

/// GET /topics
///
/// Every stored topic version the caller may read.
pub async fn list_topics(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Topic>>>> {
    let topics = state.topics.get_all_topics(&auth.principal).await?;
    Ok(Json(DataResponse { data: topics }))
}

/// GET /topics/roots
pub async fn list_root_topics(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Topic>>>> {
    let topics = state.topics.get_root_topics(&auth.principal).await?;
    Ok(Json(DataResponse { data: topics }))
}

/// POST /topics
///
/// Create version 1 of a new topic, optionally under a parent.
pub async fn create_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<impl IntoResponse> {
    let topic = state.topics.create_topic(&auth.principal, &input).await?;

    tracing::info!(
        principal_id = %auth.principal.id,
        topic_id = %topic.id,
        "Topic created via API"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: topic })))
}

/// GET /topics/{id}
pub async fn get_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Topic>>> {
    let topic = state.topics.get_topic(&auth.principal, id).await?;
    Ok(Json(DataResponse {
        data: found(topic, id)?,
    }))
}

/// PUT /topics/{id}
///
/// Persist the next version of the topic. Earlier versions are kept.
pub async fn update_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTopic>,
) -> AppResult<Json<DataResponse<Topic>>> {
    let topic = state
        .topics
        .update_topic(&auth.principal, id, &input.content, input.name.as_deref())
        .await?;
    let topic = found(topic, id)?;

    tracing::info!(
        principal_id = %auth.principal.id,
        topic_id = %topic.id,
        version = topic.version,
        "Topic updated via API"
    );

    Ok(Json(DataResponse { data: topic }))
}

/// DELETE /topics/{id}
///
/// Delete a single version record. Refused with 409 while it has children.
pub async fn delete_topic(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = state.topics.delete_topic(&auth.principal, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Topic",
            id,
        }));
    }

    tracing::info!(principal_id = %auth.principal.id, topic_id = %id, "Topic deleted via API");
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Hierarchy
-------------------------------------------------------------------------- */

/// GET /topics/{id}/children
pub async fn list_children(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Topic>>>> {
    let children = state.topics.get_child_topics(&auth.principal, id).await?;
    Ok(Json(DataResponse { data: children }))
}

/// GET /topics/{id}/tree
pub async fn get_tree(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tree = state.topics.get_topic_tree(&auth.principal, id).await?;
    Ok(Json(DataResponse {
        data: found(tree, id)?,
    }))
}

/// GET /topics/path?from={id}&to={id}
///
/// `data` is `null` when the topics are not connected.
pub async fn find_path(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PathParams>,
) -> AppResult<Json<DataResponse<Option<Vec<Topic>>>>> {
    let path = state
        .topics
        .find_path(&auth.principal, params.from, params.to)
        .await?;
    Ok(Json(DataResponse { data: path }))
}

/* --------------------------------------------------------------------------
Versions
-------------------------------------------------------------------------- */

/// GET /topics/{root_id}/versions
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(root_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Topic>>>> {
    let versions = state
        .topics
        .get_all_topic_versions(&auth.principal, root_id)
        .await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /topics/{root_id}/versions/latest
pub async fn get_latest_version(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(root_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Topic>>> {
    let topic = state
        .topics
        .get_latest_topic_version(&auth.principal, root_id)
        .await?;
    Ok(Json(DataResponse {
        data: found(topic, root_id)?,
    }))
}

/// GET /topics/{root_id}/versions/{version}
pub async fn get_version(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((root_id, version)): Path<(DbId, i32)>,
) -> AppResult<Json<DataResponse<Topic>>> {
    let topic = state
        .topics
        .get_topic_version(&auth.principal, root_id, version)
        .await?;
    Ok(Json(DataResponse {
        data: found(topic, root_id)?,
    }))
}
