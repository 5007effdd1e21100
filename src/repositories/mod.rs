use sqlx::PgPool;

pub mod comments_repo;
pub mod posts_repo;
pub mod schema;

use comments_repo::CommentsRepository;
use posts_repo::PostsRepository;

#[derive(Clone)]
pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Everything the blog endpoints need from storage.
pub trait BlogRepository: PostsRepository + CommentsRepository {}

impl<T: PostsRepository + CommentsRepository> BlogRepository for T {}
