//! SQLite post store (embedded, single database file)

use anyhow::{Context, Result};
use async_trait::async_trait;
use blog_core::seed::seed_posts;
use blog_core::{BlogError, NewPost, Post, PostId, PostPatch, PostStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

/// Post store persisted in a local SQLite file
///
/// The schema has no author column; an author on a `NewPost` is not persisted.
pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    /// Open (or create) the database file and make sure the schema exists
    pub async fn open(database_path: &str) -> Result<Self> {
        info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps ids of deleted posts from being handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(100) NOT NULL,
                content TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert the seed posts if the table is empty; returns how many were inserted
    pub async fn seed_if_empty(&self) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            debug!("Database already holds {} posts, skipping seed", count);
            return Ok(0);
        }

        info!("Database is empty, inserting initial posts...");
        let posts = seed_posts();
        for post in &posts {
            sqlx::query("INSERT INTO posts (title, content) VALUES (?1, ?2)")
                .bind(&post.title)
                .bind(&post.content)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(posts.len())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn create_post(&self, post: NewPost) -> blog_core::Result<Post> {
        post.validate()?;

        let row: PostRow = sqlx::query_as(
            r#"
            INSERT INTO posts (title, content)
            VALUES (?1, ?2)
            RETURNING id, title, content
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn list_posts(&self) -> blog_core::Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, content FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn get_post(&self, id: PostId) -> blog_core::Result<Post> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, content FROM posts WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Post::from).ok_or(BlogError::PostNotFound(id))
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> blog_core::Result<Post> {
        if let Err(e) = patch.validate() {
            // A missing post wins over a bad patch
            self.get_post(id).await?;
            return Err(e.into());
        }

        // One statement, so concurrent partial updates cannot drop each other's fields
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            UPDATE posts
            SET title = COALESCE(?1, title), content = COALESCE(?2, content)
            WHERE id = ?3
            RETURNING id, title, content
            "#,
        )
        .bind(patch.title)
        .bind(patch.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Post::from).ok_or(BlogError::PostNotFound(id))
    }

    async fn delete_post(&self, id: PostId) -> blog_core::Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(BlogError::PostNotFound(id));
        }
        Ok(())
    }

    async fn count_posts(&self) -> blog_core::Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(count as usize)
    }
}

fn storage_error(e: sqlx::Error) -> BlogError {
    BlogError::Storage(e.to_string())
}

// Row types for SQLx
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            title: r.title,
            content: r.content,
            author: None,
        }
    }
}
