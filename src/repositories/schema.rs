use sqlx::PgPool;
use tracing::info;

use crate::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description VARCHAR(255) NOT NULL,
    body TEXT NOT NULL,
    author VARCHAR(255) NOT NULL,
    tags TEXT[] NOT NULL DEFAULT '{}',
    categories TEXT[] NOT NULL DEFAULT '{}',
    created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated TIMESTAMPTZ,
    published TIMESTAMPTZ
);

ALTER TABLE posts ADD COLUMN IF NOT EXISTS tags TEXT[] NOT NULL DEFAULT '{}';
ALTER TABLE posts ADD COLUMN IF NOT EXISTS categories TEXT[] NOT NULL DEFAULT '{}';

CREATE TABLE IF NOT EXISTS comments (
    id SERIAL PRIMARY KEY,
    postid INTEGER NOT NULL,
    body TEXT NOT NULL,
    author VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated TIMESTAMPTZ,
    published TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS comments_postid_idx ON comments (postid);
CREATE INDEX IF NOT EXISTS comments_email_idx ON comments (email);

DO $$
BEGIN
    IF NOT EXISTS (
        SELECT 1 FROM pg_constraint WHERE conname = 'comments_postid_fkey'
    ) THEN
        ALTER TABLE comments
            ADD CONSTRAINT comments_postid_fkey
            FOREIGN KEY (postid) REFERENCES posts (id) ON DELETE CASCADE;
    END IF;
END
$$;
"#;

const SEED: &str = r#"
INSERT INTO posts (title, description, body, author, created) VALUES
    ('First Post', 'This is my first post', 'This is the body of my first post', 'Dotnetdude', '2021-01-01'),
    ('Second Post', 'This is my second post', 'This is the body of my second post', 'Dotnetdude', '2021-01-02'),
    ('Third Post', 'This is my third post', 'This is the body of my third post', 'Dotnetdude', '2021-01-03'),
    ('Fourth Post', 'This is my fourth post', 'This is the body of my fourth post', 'Dotnetdude', '2021-01-04'),
    ('Fifth Post', 'This is my fifth post', 'This is the body of my fifth post', 'Dotnetdude', '2021-01-05'),
    ('Sixth Post', 'This is my sixth post', 'This is the body of my sixth post', 'Dotnetdude', '2021-01-06');

INSERT INTO comments (postid, body, author, email, created)
SELECT p.id, c.body, 'Dotnetdude', 'john@doe.com', TIMESTAMPTZ '2021-01-06'
FROM (VALUES
    (1, 'First Post', 'This is the first comment on the first post'),
    (2, 'First Post', 'This is the second comment on the first post'),
    (3, 'First Post', 'This is the third comment on the first post'),
    (4, 'Second Post', 'This is the fourth comment on the second post')
) AS c(ordinal, title, body)
JOIN posts p ON p.title = c.title
ORDER BY c.ordinal;
"#;

/// Creates the tables, indexes and the cascading foreign key when missing.
/// Safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Inserts the sample posts and comments, but only into an empty `posts`
/// table. Returns whether anything was inserted.
pub async fn seed(pool: &PgPool) -> Result<bool> {
    let has_posts: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM posts)")
        .fetch_one(pool)
        .await?;

    if has_posts {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    sqlx::raw_sql(SEED).execute(&mut *tx).await?;
    tx.commit().await?;

    info!("Seeded sample posts and comments");
    Ok(true)
}

pub async fn initialise(pool: &PgPool) -> Result<()> {
    ensure_schema(pool).await?;
    seed(pool).await?;
    Ok(())
}
