use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};

use crate::{
    models::{
        comments::{Comment, CommentDto},
        posts::{Post, PostDto},
    },
    repositories::BlogRepository,
    Error, Result,
};

/// Turns repository answers into the endpoint contract: absent rows and
/// zero-row writes become `Error::NotFound`.
#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn BlogRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let posts = self.repo.get_posts().await?;

        Ok(posts)
    }

    pub async fn get_all_posts_with_comments(&self) -> Result<Vec<Post>> {
        let posts = self.repo.get_posts().await?;
        let comments = self.repo.get_comments().await?;

        let mut by_post: HashMap<i32, Vec<Comment>> = HashMap::new();
        for comment in comments {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        let posts_with_comments = posts
            .into_iter()
            .map(|post| {
                let comments = by_post.remove(&post.id).unwrap_or_default();
                post.with_comments(comments)
            })
            .collect();

        Ok(posts_with_comments)
    }

    pub async fn get_post(&self, post_id: i32) -> Result<Post> {
        self.repo.get_post(post_id).await?.ok_or(Error::NotFound)
    }

    pub async fn get_post_with_comments(&self, post_id: i32) -> Result<Post> {
        let post = self.get_post(post_id).await?;
        let comments = self.repo.get_comments_for_post(post_id).await?;

        Ok(post.with_comments(comments))
    }

    pub async fn create_post(&self, post: &PostDto) -> Result<Post> {
        self.repo.create_post(post).await
    }

    pub async fn update_post(
        &self,
        post_id: i32,
        post: &PostDto,
        updated: DateTime<Utc>,
    ) -> Result<Post> {
        self.repo
            .update_post(post_id, post, updated)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn delete_post(&self, post_id: i32) -> Result<()> {
        match self.repo.delete_post(post_id).await? {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }

    pub async fn get_comments(&self) -> Result<Vec<Comment>> {
        let comments = self.repo.get_comments().await?;

        Ok(comments)
    }

    pub async fn get_comments_for_post(&self, post_id: i32) -> Result<Vec<Comment>> {
        let comments = self.repo.get_comments_for_post(post_id).await?;

        Ok(comments)
    }

    pub async fn get_comment(&self, comment_id: i32) -> Result<Comment> {
        self.repo
            .get_comment(comment_id)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn create_comment(&self, post_id: i32, comment: &CommentDto) -> Result<Comment> {
        self.repo
            .create_comment(post_id, comment)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn update_comment(
        &self,
        comment_id: i32,
        comment: &CommentDto,
        updated: DateTime<Utc>,
    ) -> Result<Comment> {
        self.repo
            .update_comment(comment_id, comment, updated)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn delete_comment(&self, comment_id: i32) -> Result<()> {
        match self.repo.delete_comment(comment_id).await? {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}
