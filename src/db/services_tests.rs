//! Unit tests for the service layer, run against the in-memory repository.

use super::repositories::LocalRepository;
use super::services;
use crate::api::{NewPost, Post, PostId};

fn draft() -> NewPost {
    NewPost::new("First post", "Hello, world", "alice")
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let repo = LocalRepository::new();
    let created = services::create_post(&repo, &draft()).await.unwrap();
    assert_eq!(created.id, PostId::new(1));

    let fetched = services::get_post(&repo, created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "First post");
    assert_eq!(fetched.body, "Hello, world");
    assert_eq!(fetched.author, "alice");
}

#[tokio::test]
async fn create_rejects_empty_required_fields() {
    let repo = LocalRepository::new();

    for new_post in [
        NewPost::new("", "body", "author"),
        NewPost::new("title", "", "author"),
        NewPost::new("title", "body", ""),
        NewPost::new("   ", "body", "author"),
    ] {
        let err = services::create_post(&repo, &new_post).await.unwrap_err();
        assert!(err.is_validation(), "expected validation error: {err}");
    }

    assert!(repo.is_empty());
}

#[tokio::test]
async fn get_rejects_non_positive_ids() {
    let repo = LocalRepository::new();
    for raw in [0, -1] {
        let err = services::get_post(&repo, PostId::new(raw)).await.unwrap_err();
        assert!(err.is_validation());
    }
}

#[tokio::test]
async fn update_changes_all_mutable_fields_and_keeps_id() {
    let repo = LocalRepository::new();
    let created = services::create_post(&repo, &draft()).await.unwrap();

    let replacement = Post {
        id: created.id,
        title: "Edited".to_string(),
        body: "New body".to_string(),
        author: "bob".to_string(),
    };
    let updated = services::update_post(&repo, &replacement).await.unwrap();
    assert_eq!(updated.id, created.id);

    let fetched = services::get_post(&repo, created.id).await.unwrap();
    assert_eq!(fetched, replacement);
}

#[tokio::test]
async fn update_missing_post_reports_not_found() {
    let repo = LocalRepository::new();
    let ghost = Post {
        id: PostId::new(99),
        title: "t".to_string(),
        body: "b".to_string(),
        author: "a".to_string(),
    };
    let err = services::update_post(&repo, &ghost).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_then_get_reports_not_found() {
    let repo = LocalRepository::new();
    let created = services::create_post(&repo, &draft()).await.unwrap();

    services::delete_post(&repo, created.id).await.unwrap();
    let err = services::get_post(&repo, created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn list_on_empty_store_is_empty_not_an_error() {
    let repo = LocalRepository::new();
    let posts = services::list_posts(&repo).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn reset_restarts_id_sequence_at_one() {
    let repo = LocalRepository::new();
    services::create_post(&repo, &draft()).await.unwrap();
    services::create_post(&repo, &draft()).await.unwrap();

    services::reset(&repo).await.unwrap();
    let first_after_reset = services::create_post(&repo, &draft()).await.unwrap();
    assert_eq!(first_after_reset.id, PostId::new(1));
}

#[tokio::test]
async fn health_check_reports_reachable_store() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
}
