//! Repository trait for post persistence.
//!
//! The trait is the seam between the HTTP/service layers and the storage
//! backends. Implementations live in [`crate::db::repositories`]:
//! `LocalRepository` (in-memory) and `PostgresRepository` (Diesel).

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{NewPost, Post, PostId};

/// Storage operations for posts.
///
/// All methods are single round trips against the backing store; consistency
/// for concurrent updates to the same row is delegated to the store's native
/// transaction semantics (last write wins at row granularity).
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a new post and return it with the store-assigned id.
    async fn create_post(&self, new_post: &NewPost) -> RepositoryResult<Post>;

    /// Fetch a post by id. Returns `NotFound` when no row has that id.
    async fn get_post(&self, id: PostId) -> RepositoryResult<Post>;

    /// Overwrite title, body and author of the row matching `post.id`.
    ///
    /// Returns `NotFound` when the id matches no row (zero rows affected).
    async fn update_post(&self, post: &Post) -> RepositoryResult<Post>;

    /// Delete the row matching `id`. Idempotent: deleting an absent id
    /// succeeds.
    async fn delete_post(&self, id: PostId) -> RepositoryResult<()>;

    /// Return every stored post, ordered by id (insertion order). Empty
    /// storage yields an empty vector, not an error.
    async fn list_posts(&self) -> RepositoryResult<Vec<Post>>;

    /// Remove every post and restart id assignment from 1.
    ///
    /// Used by test harnesses to get a deterministic sequence between runs.
    async fn reset(&self) -> RepositoryResult<()>;
}
