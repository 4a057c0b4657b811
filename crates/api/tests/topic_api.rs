//! HTTP-level tests for the `/api/v1/topics` routes.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_principal, delete_auth, get_auth, post_json_auth,
    put_json_auth, test_store,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use topicvault_db::Store;

struct Fixture {
    _dir: TempDir,
    store: Store,
    admin: String,
    contributor: String,
    viewer: String,
}

async fn fixture() -> Fixture {
    let (dir, store) = test_store().await;
    let admin = create_principal(&store, "ada", "admin").await;
    let contributor = create_principal(&store, "carl", "contributor").await;
    let viewer = create_principal(&store, "vera", "viewer").await;
    Fixture {
        _dir: dir,
        store,
        admin,
        contributor,
        viewer,
    }
}

impl Fixture {
    fn app(&self) -> axum::Router {
        build_test_app(self.store.clone())
    }

    async fn create(&self, name: &str, parent: Option<&Value>) -> Value {
        let body = json!({
            "name": name,
            "content": format!("{name} body"),
            "parentTopicId": parent.map(|p| p["id"].clone()),
        });
        let response = post_json_auth(self.app(), "/api/v1/topics", body, &self.contributor).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["data"].clone()
    }
}

fn id_of(topic: &Value) -> String {
    topic["id"].as_str().expect("topic id").to_string()
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(id_of)
        .collect()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_topic() {
    let fx = fixture().await;
    let topic = fx.create("Rust", None).await;

    assert_eq!(topic["version"], 1);
    assert_eq!(topic["rootTopicId"], topic["id"]);
    assert!(topic["parentTopicId"].is_null());
    assert!(topic["previousVersionId"].is_null());

    let uri = format!("/api/v1/topics/{}", id_of(&topic));
    let response = get_auth(fx.app(), &uri, &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], topic);
}

#[tokio::test]
async fn viewer_cannot_create() {
    let fx = fixture().await;
    let body = json!({ "name": "Nope", "content": "x" });

    let response = post_json_auth(fx.app(), "/api/v1/topics", body, &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "PERMISSION_DENIED");

    let response = get_auth(fx.app(), "/api/v1/topics", &fx.admin).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn create_with_blank_name_is_validation_error() {
    let fx = fixture().await;
    let body = json!({ "name": "  ", "content": "x" });

    let response = post_json_auth(fx.app(), "/api/v1/topics", body, &fx.admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_under_missing_parent_is_not_found() {
    let fx = fixture().await;
    let body = json!({
        "name": "Orphan",
        "content": "x",
        "parentTopicId": "0190a000-0000-7000-8000-000000000000",
    });

    let response = post_json_auth(fx.app(), "/api/v1/topics", body, &fx.admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_missing_topic_is_not_found() {
    let fx = fixture().await;
    let response = get_auth(
        fx.app(),
        "/api/v1/topics/0190a000-0000-7000-8000-000000000000",
        &fx.viewer,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let fx = fixture().await;
    let response = get_auth(fx.app(), "/api/v1/topics/not-a-uuid", &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_creates_next_version() {
    let fx = fixture().await;
    let v1 = fx.create("Doc", None).await;
    let uri = format!("/api/v1/topics/{}", id_of(&v1));

    let response = put_json_auth(
        fx.app(),
        &uri,
        json!({ "content": "second", "name": "Doc v2" }),
        &fx.contributor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let v2 = body_json(response).await["data"].clone();

    assert_eq!(v2["version"], 2);
    assert_eq!(v2["previousVersionId"], v1["id"]);
    assert_eq!(v2["rootTopicId"], v1["id"]);
    assert_eq!(v2["name"], "Doc v2");
    assert_ne!(v2["id"], v1["id"]);

    // The original record is untouched.
    let response = get_auth(fx.app(), &uri, &fx.viewer).await;
    assert_eq!(body_json(response).await["data"]["content"], "Doc body");
}

#[tokio::test]
async fn viewer_update_is_forbidden_and_missing_update_is_not_found() {
    let fx = fixture().await;
    let v1 = fx.create("Doc", None).await;

    let uri = format!("/api/v1/topics/{}", id_of(&v1));
    let response = put_json_auth(fx.app(), &uri, json!({ "content": "x" }), &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        fx.app(),
        "/api/v1/topics/0190a000-0000-7000-8000-000000000000",
        json!({ "content": "x" }),
        &fx.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_rules_by_role_and_children() {
    let fx = fixture().await;
    let parent = fx.create("Parent", None).await;
    let child = fx.create("Child", Some(&parent)).await;
    let parent_uri = format!("/api/v1/topics/{}", id_of(&parent));
    let child_uri = format!("/api/v1/topics/{}", id_of(&child));

    let response = delete_auth(fx.app(), &child_uri, &fx.contributor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(fx.app(), &parent_uri, &fx.admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = delete_auth(fx.app(), &child_uri, &fx.admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(fx.app(), &child_uri, &fx.admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(fx.app(), &parent_uri, &fx.admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roots_and_children() {
    let fx = fixture().await;
    let a = fx.create("A", None).await;
    let a1 = fx.create("A1", Some(&a)).await;
    let b = fx.create("B", None).await;

    let response = get_auth(fx.app(), "/api/v1/topics/roots", &fx.viewer).await;
    assert_eq!(ids(&body_json(response).await["data"]), vec![id_of(&a), id_of(&b)]);

    let uri = format!("/api/v1/topics/{}/children", id_of(&a));
    let response = get_auth(fx.app(), &uri, &fx.viewer).await;
    assert_eq!(ids(&body_json(response).await["data"]), vec![id_of(&a1)]);

    let response = get_auth(fx.app(), "/api/v1/topics", &fx.viewer).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn tree_nests_descendants() {
    let fx = fixture().await;
    let root = fx.create("Root", None).await;
    let a = fx.create("A", Some(&root)).await;
    let a1 = fx.create("A1", Some(&a)).await;

    let uri = format!("/api/v1/topics/{}/tree", id_of(&root));
    let response = get_auth(fx.app(), &uri, &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::OK);

    let tree = body_json(response).await["data"].clone();
    assert_eq!(tree["id"], root["id"]);
    assert_eq!(tree["children"][0]["id"], a["id"]);
    assert_eq!(tree["children"][0]["children"][0]["id"], a1["id"]);
    assert_eq!(tree["children"][0]["children"][0]["children"], json!([]));

    let response = get_auth(
        fx.app(),
        "/api/v1/topics/0190a000-0000-7000-8000-000000000000/tree",
        &fx.viewer,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn path_between_siblings_and_disconnected_topics() {
    let fx = fixture().await;
    let root = fx.create("Root", None).await;
    let a = fx.create("A", Some(&root)).await;
    let b = fx.create("B", Some(&root)).await;
    let lonely = fx.create("Lonely", None).await;

    let uri = format!("/api/v1/topics/path?from={}&to={}", id_of(&a), id_of(&b));
    let response = get_auth(fx.app(), &uri, &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        ids(&body_json(response).await["data"]),
        vec![id_of(&a), id_of(&root), id_of(&b)]
    );

    let uri = format!("/api/v1/topics/path?from={}&to={}", id_of(&a), id_of(&lonely));
    let response = get_auth(fx.app(), &uri, &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn version_routes() {
    let fx = fixture().await;
    let v1 = fx.create("Doc", None).await;
    let root_id = id_of(&v1);
    let uri = format!("/api/v1/topics/{root_id}");

    let response = put_json_auth(fx.app(), &uri, json!({ "content": "two" }), &fx.admin).await;
    let v2 = body_json(response).await["data"].clone();

    let response = get_auth(fx.app(), &format!("{uri}/versions"), &fx.viewer).await;
    assert_eq!(
        ids(&body_json(response).await["data"]),
        vec![id_of(&v1), id_of(&v2)]
    );

    let response = get_auth(fx.app(), &format!("{uri}/versions/latest"), &fx.viewer).await;
    assert_eq!(body_json(response).await["data"]["id"], v2["id"]);

    let response = get_auth(fx.app(), &format!("{uri}/versions/1"), &fx.viewer).await;
    assert_eq!(body_json(response).await["data"]["id"], v1["id"]);

    let response = get_auth(fx.app(), &format!("{uri}/versions/7"), &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Version numbers start at 1, so 0 is simply absent.
    let response = get_auth(fx.app(), &format!("{uri}/versions/0"), &fx.viewer).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
