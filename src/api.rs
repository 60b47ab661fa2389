//! Domain types shared across the repository and HTTP layers.

use serde::{Deserialize, Serialize};

/// Post identifier (database primary key).
///
/// Ids are assigned by the storage backend from a monotonic sequence and are
/// never reused after deletion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(pub i32);

impl PostId {
    pub fn new(value: i32) -> Self {
        PostId(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Whether this id could refer to a stored row.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Primary key assigned by the storage backend
    pub id: PostId,
    /// Post title
    pub title: String,
    /// Post body text
    pub body: String,
    /// Author display name (plain string, not a user reference)
    pub author: String,
}

/// Input for creating a post; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author: author.into(),
        }
    }
}

impl Post {
    /// Attach a store-assigned id to a creation input.
    pub fn from_new(id: PostId, new_post: &NewPost) -> Self {
        Self {
            id,
            title: new_post.title.clone(),
            body: new_post.body.clone(),
            author: new_post.author.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_validity() {
        assert!(PostId::new(1).is_valid());
        assert!(!PostId::new(0).is_valid());
        assert!(!PostId::new(-7).is_valid());
    }

    #[test]
    fn post_serializes_with_flat_id() {
        let post = Post::from_new(PostId::new(3), &NewPost::new("T", "B", "A"));
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "title": "T", "body": "B", "author": "A"})
        );
    }
}
