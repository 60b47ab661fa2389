//! Data Transfer Objects for the HTTP API.
//!
//! Posts serialize directly from the domain type; the DTOs here cover the
//! id-less request bodies and the non-post response shapes.

use serde::{Deserialize, Serialize};

// Domain types are already serializable and double as response bodies.
pub use crate::api::{NewPost, Post, PostId};

/// Request body for creating or updating a post.
///
/// All three fields are required; the service layer rejects empty values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    pub author: String,
}

impl From<PostPayload> for NewPost {
    fn from(payload: PostPayload) -> Self {
        NewPost {
            title: payload.title,
            body: payload.body,
            author: payload.author,
        }
    }
}

impl PostPayload {
    /// Combine the payload with a path id into a full post for updates.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            body: self.body,
            author: self.author,
        }
    }
}

/// Confirmation body for successful deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub result: String,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Database connectivity status
    pub database: String,
}
