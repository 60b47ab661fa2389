//! In-memory repository implementation.
//!
//! Backs unit tests, HTTP integration tests and local development without a
//! running Postgres. Mirrors the Postgres backend's observable semantics:
//! ids come from a monotonic sequence starting at 1 and are never reused
//! after deletion, and listing returns rows in id order.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::api::{NewPost, Post, PostId};
use crate::db::repository::{
    ErrorContext, PostRepository, RepositoryError, RepositoryResult,
};

#[derive(Debug)]
struct Store {
    posts: BTreeMap<i32, Post>,
    next_id: i32,
}

impl Store {
    fn new() -> Self {
        Self {
            posts: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory post repository.
#[derive(Debug)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::new()),
        }
    }

    /// Number of stored posts.
    pub fn len(&self) -> usize {
        self.store.read().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().posts.is_empty()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn create_post(&self, new_post: &NewPost) -> RepositoryResult<Post> {
        let mut store = self.store.write();
        let id = PostId::new(store.next_id);
        // The sequence only moves forward; deleted ids are never reassigned.
        store.next_id += 1;

        let post = Post::from_new(id, new_post);
        store.posts.insert(id.value(), post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: PostId) -> RepositoryResult<Post> {
        self.store.read().posts.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "post not found",
                ErrorContext::new("get_post")
                    .with_entity("post")
                    .with_entity_id(id),
            )
        })
    }

    async fn update_post(&self, post: &Post) -> RepositoryResult<Post> {
        let mut store = self.store.write();
        match store.posts.get_mut(&post.id.value()) {
            Some(existing) => {
                existing.title = post.title.clone();
                existing.body = post.body.clone();
                existing.author = post.author.clone();
                Ok(existing.clone())
            }
            None => Err(RepositoryError::not_found_with_context(
                "post not found",
                ErrorContext::new("update_post")
                    .with_entity("post")
                    .with_entity_id(post.id),
            )),
        }
    }

    async fn delete_post(&self, id: PostId) -> RepositoryResult<()> {
        // Idempotent: removing an absent id is still a success.
        self.store.write().posts.remove(&id.value());
        Ok(())
    }

    async fn list_posts(&self) -> RepositoryResult<Vec<Post>> {
        // BTreeMap iteration is id-ordered, which matches insertion order
        // because the sequence is monotonic.
        Ok(self.store.read().posts.values().cloned().collect())
    }

    async fn reset(&self) -> RepositoryResult<()> {
        let mut store = self.store.write();
        *store = Store::new();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(n: u32) -> NewPost {
        NewPost::new(format!("title {}", n), format!("body {}", n), "author")
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_from_one() {
        let repo = LocalRepository::new();
        let first = repo.create_post(&draft(1)).await.unwrap();
        let second = repo.create_post(&draft(2)).await.unwrap();
        assert_eq!(first.id, PostId::new(1));
        assert_eq!(second.id, PostId::new(2));
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reused() {
        let repo = LocalRepository::new();
        let first = repo.create_post(&draft(1)).await.unwrap();
        repo.delete_post(first.id).await.unwrap();
        let next = repo.create_post(&draft(2)).await.unwrap();
        assert_eq!(next.id, PostId::new(2));
    }

    #[tokio::test]
    async fn get_missing_post_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo.get_post(PostId::new(11)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let repo = LocalRepository::new();
        let post = Post::from_new(PostId::new(5), &draft(1));
        let err = repo.update_post(&post).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = LocalRepository::new();
        let post = repo.create_post(&draft(1)).await.unwrap();
        repo.delete_post(post.id).await.unwrap();
        repo.delete_post(post.id).await.unwrap();
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn list_returns_every_row_in_insertion_order() {
        let repo = LocalRepository::new();
        for n in 1..=4 {
            repo.create_post(&draft(n)).await.unwrap();
        }
        let posts = repo.list_posts().await.unwrap();
        assert_eq!(posts.len(), 4);
        let ids: Vec<i32> = posts.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn reset_restarts_the_sequence() {
        let repo = LocalRepository::new();
        repo.create_post(&draft(1)).await.unwrap();
        repo.create_post(&draft(2)).await.unwrap();
        repo.reset().await.unwrap();

        assert!(repo.is_empty());
        let post = repo.create_post(&draft(3)).await.unwrap();
        assert_eq!(post.id, PostId::new(1));
    }
}
