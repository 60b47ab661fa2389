//! Service layer over the repository trait.
//!
//! These functions hold the business rules that apply regardless of which
//! storage backend is in use: required-field validation on writes and
//! positive-id validation on reads. Handlers and bindings should call these
//! instead of hitting the repository directly.

use crate::api::{NewPost, Post, PostId};
use crate::db::repository::{PostRepository, RepositoryError, RepositoryResult};

/// Check that the backing store is reachable.
pub async fn health_check(repo: &dyn PostRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

fn validate_fields(title: &str, body: &str, author: &str) -> RepositoryResult<()> {
    if title.trim().is_empty() {
        return Err(RepositoryError::validation("title must not be empty"));
    }
    if body.trim().is_empty() {
        return Err(RepositoryError::validation("body must not be empty"));
    }
    if author.trim().is_empty() {
        return Err(RepositoryError::validation("author must not be empty"));
    }
    Ok(())
}

fn validate_id(id: PostId) -> RepositoryResult<()> {
    if !id.is_valid() {
        return Err(RepositoryError::validation(format!(
            "post id must be a positive integer, got {}",
            id
        )));
    }
    Ok(())
}

/// Create a post. All three fields are required and must be non-empty.
pub async fn create_post(
    repo: &dyn PostRepository,
    new_post: &NewPost,
) -> RepositoryResult<Post> {
    validate_fields(&new_post.title, &new_post.body, &new_post.author)?;

    let post = repo.create_post(new_post).await?;
    log::info!("created post {} by {}", post.id, post.author);
    Ok(post)
}

/// Fetch a post by id.
pub async fn get_post(repo: &dyn PostRepository, id: PostId) -> RepositoryResult<Post> {
    validate_id(id)?;
    repo.get_post(id).await
}

/// Replace title, body and author of an existing post.
pub async fn update_post(repo: &dyn PostRepository, post: &Post) -> RepositoryResult<Post> {
    validate_id(post.id)?;
    validate_fields(&post.title, &post.body, &post.author)?;

    let updated = repo.update_post(post).await?;
    log::info!("updated post {}", updated.id);
    Ok(updated)
}

/// Delete a post by id. Deleting an absent id succeeds.
pub async fn delete_post(repo: &dyn PostRepository, id: PostId) -> RepositoryResult<()> {
    validate_id(id)?;
    repo.delete_post(id).await?;
    log::info!("deleted post {}", id);
    Ok(())
}

/// List every stored post in insertion order.
pub async fn list_posts(repo: &dyn PostRepository) -> RepositoryResult<Vec<Post>> {
    repo.list_posts().await
}

/// Remove every post and restart id assignment. Test harness hook.
pub async fn reset(repo: &dyn PostRepository) -> RepositoryResult<()> {
    repo.reset().await
}
