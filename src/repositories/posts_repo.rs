use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PostgresRepo;
use crate::{
    models::posts::{Post, PostDto},
    Result,
};

#[async_trait]
pub trait PostsRepository: Send + Sync {
    async fn get_posts(&self) -> Result<Vec<Post>>;
    async fn get_post(&self, post_id: i32) -> Result<Option<Post>>;
    async fn create_post(&self, post: &PostDto) -> Result<Post>;
    async fn update_post(
        &self,
        post_id: i32,
        post: &PostDto,
        updated: DateTime<Utc>,
    ) -> Result<Option<Post>>;
    /// Returns the number of rows deleted.
    async fn delete_post(&self, post_id: i32) -> Result<u64>;
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, description, body, author, tags, categories, created, updated, published
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn get_post(&self, post_id: i32) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, description, body, author, tags, categories, created, updated, published
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn create_post(&self, post: &PostDto) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, description, body, author, tags, categories, created)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, body, author, tags, categories, created, updated, published
            "#,
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.body)
        .bind(&post.author)
        .bind(&post.tags)
        .bind(&post.categories)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update_post(
        &self,
        post_id: i32,
        post: &PostDto,
        updated: DateTime<Utc>,
    ) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2,
                description = $3,
                body = $4,
                author = $5,
                tags = $6,
                categories = $7,
                updated = $8,
                published = $9
            WHERE id = $1
            RETURNING id, title, description, body, author, tags, categories, created, updated, published
            "#,
        )
        .bind(post_id)
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.body)
        .bind(&post.author)
        .bind(&post.tags)
        .bind(&post.categories)
        .bind(updated)
        .bind(post.published)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete_post(&self, post_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = $1
            "#,
        )
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
