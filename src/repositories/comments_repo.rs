use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use super::PostgresRepo;
use crate::{
    models::comments::{Comment, CommentDto},
    Result,
};

#[async_trait]
pub trait CommentsRepository: Send + Sync {
    async fn get_comments(&self) -> Result<Vec<Comment>>;
    async fn get_comments_for_post(&self, post_id: i32) -> Result<Vec<Comment>>;
    async fn get_comment(&self, comment_id: i32) -> Result<Option<Comment>>;
    /// `None` when the parent post does not exist.
    async fn create_comment(&self, post_id: i32, comment: &CommentDto)
        -> Result<Option<Comment>>;
    async fn update_comment(
        &self,
        comment_id: i32,
        comment: &CommentDto,
        updated: DateTime<Utc>,
    ) -> Result<Option<Comment>>;
    /// Returns the number of rows deleted.
    async fn delete_comment(&self, comment_id: i32) -> Result<u64>;
}

#[async_trait]
impl CommentsRepository for PostgresRepo {
    async fn get_comments(&self) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, postid, body, author, email, created, updated, published
            FROM comments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn get_comments_for_post(&self, post_id: i32) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, postid, body, author, email, created, updated, published
            FROM comments
            WHERE postid = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn get_comment(&self, comment_id: i32) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, postid, body, author, email, created, updated, published
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn create_comment(
        &self,
        post_id: i32,
        comment: &CommentDto,
    ) -> Result<Option<Comment>> {
        // Selecting from posts makes the insert a no-op for an unknown post.
        let inserted = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (postid, body, author, email, created)
            SELECT p.id, $2, $3, $4, $5
            FROM posts p
            WHERE p.id = $1
            RETURNING id, postid, body, author, email, created, updated, published
            "#,
        )
        .bind(post_id)
        .bind(&comment.body)
        .bind(&comment.author)
        .bind(&comment.email)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await;

        match inserted {
            Ok(comment) => Ok(comment),
            // The post was deleted between the lookup and the insert.
            Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
                warn!(post_id, "comment insert hit a missing post");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_comment(
        &self,
        comment_id: i32,
        comment: &CommentDto,
        updated: DateTime<Utc>,
    ) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET body = $2,
                author = $3,
                email = $4,
                updated = $5,
                published = $6
            WHERE id = $1
            RETURNING id, postid, body, author, email, created, updated, published
            "#,
        )
        .bind(comment_id)
        .bind(&comment.body)
        .bind(&comment.author)
        .bind(&comment.email)
        .bind(updated)
        .bind(comment.published)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
