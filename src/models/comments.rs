use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use validator::Validate;

use crate::validators::non_blank;

use super::null_as_empty;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Comment {
    pub id: i32,
    #[serde(rename = "postId")]
    pub post_id: i32,
    pub body: String,
    pub author: String,
    pub email: String,
    pub avatar: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
    pub published: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, PgRow> for Comment {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let email: String = row.try_get("email")?;

        Ok(Comment {
            id: row.try_get("id")?,
            post_id: row.try_get("postid")?,
            body: row.try_get("body")?,
            author: row.try_get("author")?,
            avatar: gravatar_url(&email),
            email,
            created: row.try_get("created")?,
            updated: row.try_get("updated")?,
            published: row.try_get("published")?,
        })
    }
}

/// Gravatar image URL for an email address (md5 of the address as given).
pub fn gravatar_url(email: &str) -> String {
    format!(
        "https://www.gravatar.com/avatar/{:x}",
        md5::compute(email.as_bytes())
    )
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentDto {
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "non_blank", message = "Comment is required"))]
    pub body: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "non_blank", message = "Author is required"))]
    pub author: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(custom(function = "non_blank", message = "Email is required"))]
    pub email: String,
    pub published: Option<DateTime<Utc>>,
}
