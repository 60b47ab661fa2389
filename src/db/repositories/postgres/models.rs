use diesel::prelude::*;

use super::schema::posts;
use crate::api::{NewPost, Post, PostId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub author: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow {
    pub title: String,
    pub body: String,
    pub author: String,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChangeset {
    pub title: String,
    pub body: String,
    pub author: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::new(row.id),
            title: row.title,
            body: row.body,
            author: row.author,
        }
    }
}

impl From<&NewPost> for NewPostRow {
    fn from(new_post: &NewPost) -> Self {
        Self {
            title: new_post.title.clone(),
            body: new_post.body.clone(),
            author: new_post.author.clone(),
        }
    }
}

impl From<&Post> for PostChangeset {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
            author: post.author.clone(),
        }
    }
}
