#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use blog_api::{
    config::{Config, Environment},
    models::{
        comments::{gravatar_url, Comment, CommentDto},
        posts::{Post, PostDto},
    },
    repositories::{comments_repo::CommentsRepository, posts_repo::PostsRepository},
    routes::create_routes,
    services::posts::PostsService,
    slug::slugify,
    AppState, Result,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

pub const PREFIX: &str = "/posts/v1";

#[derive(Default)]
struct Store {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    next_post_id: i32,
    next_comment_id: i32,
}

/// Storage double that behaves like the Postgres schema: serial ids and
/// cascading deletes from posts to comments.
#[derive(Default)]
pub struct MemoryRepo {
    store: Mutex<Store>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, d, 0, 0, 0).unwrap()
}

impl MemoryRepo {
    /// Same rows the schema manager seeds.
    pub fn seeded() -> Arc<Self> {
        Arc::new(Self::with_seed_rows())
    }

    /// Seeded repo whose post listing stalls for `delay` before answering.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::with_seed_rows()
        })
    }

    fn with_seed_rows() -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            let titles = ["First", "Second", "Third", "Fourth", "Fifth", "Sixth"];
            for (i, ordinal) in titles.iter().enumerate() {
                let lower = ordinal.to_lowercase();
                store.insert_post(
                    &PostDto {
                        title: format!("{ordinal} Post"),
                        description: format!("This is my {lower} post"),
                        body: format!("This is the body of my {lower} post"),
                        author: "Dotnetdude".to_string(),
                        ..Default::default()
                    },
                    day(i as u32 + 1),
                );
            }
            let comments = [
                (1, "This is the first comment on the first post"),
                (1, "This is the second comment on the first post"),
                (1, "This is the third comment on the first post"),
                (2, "This is the fourth comment on the second post"),
            ];
            for (post_id, body) in comments {
                store.insert_comment(
                    post_id,
                    &CommentDto {
                        body: body.to_string(),
                        author: "Dotnetdude".to_string(),
                        email: "john@doe.com".to_string(),
                        published: None,
                    },
                    day(6),
                );
            }
        }
        repo
    }

    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.store.lock().unwrap()
    }
}

impl Store {
    fn insert_post(&mut self, post: &PostDto, created: DateTime<Utc>) -> Post {
        self.next_post_id += 1;
        let post = Post {
            id: self.next_post_id,
            title: post.title.clone(),
            slug: slugify(&post.title),
            description: post.description.clone(),
            tags: post.tags.clone(),
            categories: post.categories.clone(),
            comments: Vec::new(),
            body: post.body.clone(),
            author: post.author.clone(),
            created,
            updated: None,
            published: None,
        };
        self.posts.push(post.clone());
        post
    }

    fn insert_comment(
        &mut self,
        post_id: i32,
        comment: &CommentDto,
        created: DateTime<Utc>,
    ) -> Option<Comment> {
        if !self.posts.iter().any(|p| p.id == post_id) {
            return None;
        }
        self.next_comment_id += 1;
        let comment = Comment {
            id: self.next_comment_id,
            post_id,
            body: comment.body.clone(),
            author: comment.author.clone(),
            email: comment.email.clone(),
            avatar: gravatar_url(&comment.email),
            created,
            updated: None,
            published: None,
        };
        self.comments.push(comment.clone());
        Some(comment)
    }
}

#[async_trait]
impl PostsRepository for MemoryRepo {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.lock().posts.clone())
    }

    async fn get_post(&self, post_id: i32) -> Result<Option<Post>> {
        Ok(self.lock().posts.iter().find(|p| p.id == post_id).cloned())
    }

    async fn create_post(&self, post: &PostDto) -> Result<Post> {
        Ok(self.lock().insert_post(post, Utc::now()))
    }

    async fn update_post(
        &self,
        post_id: i32,
        post: &PostDto,
        updated: DateTime<Utc>,
    ) -> Result<Option<Post>> {
        let mut store = self.lock();
        let Some(existing) = store.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        existing.title = post.title.clone();
        existing.slug = slugify(&post.title);
        existing.description = post.description.clone();
        existing.body = post.body.clone();
        existing.author = post.author.clone();
        existing.tags = post.tags.clone();
        existing.categories = post.categories.clone();
        existing.updated = Some(updated);
        existing.published = post.published;
        Ok(Some(existing.clone()))
    }

    async fn delete_post(&self, post_id: i32) -> Result<u64> {
        let mut store = self.lock();
        let before = store.posts.len();
        store.posts.retain(|p| p.id != post_id);
        let deleted = (before - store.posts.len()) as u64;
        if deleted > 0 {
            store.comments.retain(|c| c.post_id != post_id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl CommentsRepository for MemoryRepo {
    async fn get_comments(&self) -> Result<Vec<Comment>> {
        Ok(self.lock().comments.clone())
    }

    async fn get_comments_for_post(&self, post_id: i32) -> Result<Vec<Comment>> {
        Ok(self
            .lock()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn get_comment(&self, comment_id: i32) -> Result<Option<Comment>> {
        Ok(self
            .lock()
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .cloned())
    }

    async fn create_comment(
        &self,
        post_id: i32,
        comment: &CommentDto,
    ) -> Result<Option<Comment>> {
        Ok(self.lock().insert_comment(post_id, comment, Utc::now()))
    }

    async fn update_comment(
        &self,
        comment_id: i32,
        comment: &CommentDto,
        updated: DateTime<Utc>,
    ) -> Result<Option<Comment>> {
        let mut store = self.lock();
        let Some(existing) = store.comments.iter_mut().find(|c| c.id == comment_id) else {
            return Ok(None);
        };
        existing.body = comment.body.clone();
        existing.author = comment.author.clone();
        existing.email = comment.email.clone();
        existing.avatar = gravatar_url(&comment.email);
        existing.updated = Some(updated);
        existing.published = comment.published;
        Ok(Some(existing.clone()))
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<u64> {
        let mut store = self.lock();
        let before = store.comments.len();
        store.comments.retain(|c| c.id != comment_id);
        Ok((before - store.comments.len()) as u64)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        port: 0,
        route_prefix: PREFIX.to_string(),
        environment: Environment::Testing,
        db_max_connections: 1,
        db_acquire_timeout: Duration::from_secs(1),
        request_timeout: Duration::from_secs(5),
        json_logs: false,
    }
}

pub fn app(repo: Arc<MemoryRepo>) -> Router {
    app_with_config(repo, test_config())
}

pub fn app_with_config(repo: Arc<MemoryRepo>, config: Config) -> Router {
    let app_state = AppState {
        config,
        posts_service: PostsService::new(repo),
    };
    create_routes(Arc::new(app_state))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> TestResponse {
    match body {
        Some(json) => send_raw(app, method, path, &json.to_string()).await,
        None => {
            let request = Request::builder()
                .method(method)
                .uri(format!("{PREFIX}{path}"))
                .body(Body::empty())
                .unwrap();
            dispatch(app, request).await
        }
    }
}

/// Sends `raw` verbatim as a JSON body, for payloads `serde_json` would not
/// produce.
pub async fn send_raw(app: &Router, method: Method, path: &str, raw: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(format!("{PREFIX}{path}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, path: &str) -> TestResponse {
    send(app, Method::GET, path, None).await
}
