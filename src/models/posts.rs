use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use validator::Validate;

use crate::{slug::slugify, validators::non_blank};

use super::{comments::Comment, null_as_empty};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub comments: Vec<Comment>,
    pub body: String,
    pub author: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
    pub published: Option<DateTime<Utc>>,
}

// The slug is never stored; it is derived from whatever title the row holds.
impl<'r> FromRow<'r, PgRow> for Post {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let title: String = row.try_get("title")?;

        Ok(Post {
            id: row.try_get("id")?,
            slug: slugify(&title),
            title,
            description: row.try_get("description")?,
            tags: row.try_get("tags")?,
            categories: row.try_get("categories")?,
            comments: Vec::new(),
            body: row.try_get("body")?,
            author: row.try_get("author")?,
            created: row.try_get("created")?,
            updated: row.try_get("updated")?,
            published: row.try_get("published")?,
        })
    }
}

impl Post {
    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }
}

/// Request body for creating or replacing a post.
///
/// Missing or null text fields deserialize as empty strings so that they surface as
/// validation errors rather than JSON rejections.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDto {
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "non_blank", message = "Title is required"))]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "non_blank", message = "Description is required"))]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "non_blank", message = "Content is required"))]
    pub body: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "non_blank", message = "Author is required"))]
    pub author: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub published: Option<DateTime<Utc>>,
}
