mod support;

use axum::http::StatusCode;
use serde_json::{Value, json};

use rndm_model::UserId;
use support::{InMemoryStore, test_server};

async fn create_entry(
    server: &axum_test::TestServer,
    owner: UserId,
    title: &str,
) -> String {
    let response = server
        .post("/api/v1/entries")
        .add_header("x-user-id", owner.to_string())
        .json(&json!({
            "media_type": "movie",
            "title": title,
            "creator": "Director",
            "is_public": true,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn toggling_like_twice_returns_liked_then_unliked() {
    let store = InMemoryStore::new();
    let server = test_server(&store);
    let owner = UserId::new();
    let fan = UserId::new();
    let entry_id = create_entry(&server, owner, "Likeable").await;

    let first = server
        .post(&format!("/api/v1/entries/{entry_id}/like"))
        .add_header("x-user-id", fan.to_string())
        .await;
    first.assert_status_ok();
    let first: Value = first.json();
    assert_eq!(first["data"]["state"], "liked");
    assert_eq!(first["data"]["liked"], true);

    // Enrichment reflects the like while it exists.
    let feed = server
        .get("/api/v1/feed")
        .add_header("x-user-id", fan.to_string())
        .await;
    let feed: Value = feed.json();
    assert_eq!(feed["data"]["entries"][0]["likes_count"], 1);
    assert_eq!(feed["data"]["entries"][0]["is_liked"], true);

    let second = server
        .post(&format!("/api/v1/entries/{entry_id}/like"))
        .add_header("x-user-id", fan.to_string())
        .await;
    let second: Value = second.json();
    assert_eq!(second["data"]["state"], "unliked");
    assert_eq!(second["data"]["liked"], false);

    let feed = server
        .get("/api/v1/feed")
        .add_header("x-user-id", fan.to_string())
        .await;
    let feed: Value = feed.json();
    assert_eq!(feed["data"]["entries"][0]["likes_count"], 0);
    assert_eq!(feed["data"]["entries"][0]["is_liked"], false);
}

#[tokio::test]
async fn liking_a_missing_entry_is_not_found() {
    let store = InMemoryStore::new();
    let server = test_server(&store);
    let fan = UserId::new();

    let response = server
        .post(&format!(
            "/api/v1/entries/{}/like",
            uuid::Uuid::new_v4()
        ))
        .add_header("x-user-id", fan.to_string())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn like_requires_identity() {
    let store = InMemoryStore::new();
    let server = test_server(&store);
    let owner = UserId::new();
    let entry_id = create_entry(&server, owner, "Anonymous Like").await;

    let response = server
        .post(&format!("/api/v1/entries/{entry_id}/like"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comments_list_in_insertion_order() {
    let store = InMemoryStore::new();
    let server = test_server(&store);
    let owner = UserId::new();
    let commenter = UserId::new();
    let entry_id = create_entry(&server, owner, "Discussed").await;

    for content in ["first", "second", "third"] {
        let response = server
            .post(&format!("/api/v1/entries/{entry_id}/comments"))
            .add_header("x-user-id", commenter.to_string())
            .json(&json!({ "content": content }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["data"]["id"].is_string());
        assert!(body["data"]["created_at"].is_string());
    }

    let listed = server
        .get(&format!("/api/v1/entries/{entry_id}/comments"))
        .await;
    listed.assert_status_ok();
    let listed: Value = listed.json();
    let contents: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn blank_comment_is_rejected_before_storage() {
    let store = InMemoryStore::new();
    let server = test_server(&store);
    let owner = UserId::new();
    let entry_id = create_entry(&server, owner, "Quiet").await;

    let response = server
        .post(&format!("/api/v1/entries/{entry_id}/comments"))
        .add_header("x-user-id", owner.to_string())
        .json(&json!({ "content": "   \t " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let listed = server
        .get(&format!("/api/v1/entries/{entry_id}/comments"))
        .await;
    let listed: Value = listed.json();
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn comment_delete_is_ownership_scoped() {
    let store = InMemoryStore::new();
    let server = test_server(&store);
    let owner = UserId::new();
    let author = UserId::new();
    let stranger = UserId::new();
    let entry_id = create_entry(&server, owner, "Moderated").await;

    let response = server
        .post(&format!("/api/v1/entries/{entry_id}/comments"))
        .add_header("x-user-id", author.to_string())
        .json(&json!({ "content": "mine" }))
        .await;
    let body: Value = response.json();
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();

    // A stranger's delete is a silent no-op.
    let response = server
        .delete(&format!("/api/v1/comments/{comment_id}"))
        .add_header("x-user-id", stranger.to_string())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let listed = server
        .get(&format!("/api/v1/entries/{entry_id}/comments"))
        .await;
    let listed: Value = listed.json();
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    // The author's delete removes it.
    let response = server
        .delete(&format!("/api/v1/comments/{comment_id}"))
        .add_header("x-user-id", author.to_string())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let listed = server
        .get(&format!("/api/v1/entries/{entry_id}/comments"))
        .await;
    let listed: Value = listed.json();
    assert!(listed["data"].as_array().unwrap().is_empty());
}
