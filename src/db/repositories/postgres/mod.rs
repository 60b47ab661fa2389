//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Connection health monitoring
//! - Automatic migration execution (creates the `posts` table if absent)
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string
//! - `APP_DB_USERNAME` / `APP_DB_PASSWORD` / `APP_DB_NAME`: Credential triple
//!   composed into a connection string when no URL is set (optional
//!   `APP_DB_HOST`, default `localhost`, and `APP_DB_PORT`, default `5432`)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//!
//! Storage errors are surfaced to the caller immediately; there is no
//! transient-fault retry loop in this layer.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::api::{NewPost, Post, PostId};
use crate::db::repository::{
    ErrorContext, PostRepository, RepositoryError, RepositoryResult,
};

mod models;
mod schema;

use models::{NewPostRow, PostChangeset, PostRow};
use schema::posts;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// Prefers a full `DATABASE_URL` (or `PG_DATABASE_URL`); falls back to
    /// composing one from the `APP_DB_USERNAME` / `APP_DB_PASSWORD` /
    /// `APP_DB_NAME` credential triple.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .or_else(|_| Self::url_from_credentials())
            .map_err(|_| {
                "DATABASE_URL, PG_DATABASE_URL or the APP_DB_* credential \
                 variables must be set"
                    .to_string()
            })?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    fn url_from_credentials() -> Result<String, std::env::VarError> {
        let username = std::env::var("APP_DB_USERNAME")?;
        let password = std::env::var("APP_DB_PASSWORD")?;
        let name = std::env::var("APP_DB_NAME")?;
        let host = std::env::var("APP_DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("APP_DB_PORT").unwrap_or_else(|_| "5432".to_string());

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            username, password, host, port, name
        ))
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal(format!("Migration failed: {}", e))
        })?;

        Ok(())
    }

    /// Execute a blocking Diesel operation on a pooled connection.
    ///
    /// Diesel is synchronous, so each operation runs on the blocking thread
    /// pool. Errors are returned on the first attempt; no automatic retry.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection"),
                )
            })?;

            total_queries.fetch_add(1, Ordering::Relaxed);
            f(&mut conn).inspect_err(|_| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
            })
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))?
    }

    /// Get pool health statistics.
    pub fn pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn create_post(&self, new_post: &NewPost) -> RepositoryResult<Post> {
        let row = NewPostRow::from(new_post);
        self.with_conn(move |conn| {
            let inserted: PostRow = diesel::insert_into(posts::table)
                .values(&row)
                .returning(PostRow::as_returning())
                .get_result(conn)
                .map_err(RepositoryError::from)?;

            Ok(inserted.into())
        })
        .await
    }

    async fn get_post(&self, id: PostId) -> RepositoryResult<Post> {
        self.with_conn(move |conn| {
            posts::table
                .find(id.value())
                .select(PostRow::as_select())
                .first::<PostRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .map(Into::into)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "post not found",
                        ErrorContext::new("get_post")
                            .with_entity("post")
                            .with_entity_id(id),
                    )
                })
        })
        .await
    }

    async fn update_post(&self, post: &Post) -> RepositoryResult<Post> {
        let post = post.clone();
        self.with_conn(move |conn| {
            let changes = PostChangeset::from(&post);
            let affected = diesel::update(posts::table.find(post.id.value()))
                .set(&changes)
                .execute(conn)
                .map_err(RepositoryError::from)?;

            // Zero affected rows means the id matched nothing; surface that
            // instead of reporting a silent success.
            if affected == 0 {
                return Err(RepositoryError::not_found_with_context(
                    "post not found",
                    ErrorContext::new("update_post")
                        .with_entity("post")
                        .with_entity_id(post.id),
                ));
            }

            Ok(post)
        })
        .await
    }

    async fn delete_post(&self, id: PostId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            // Idempotent: affected row count of zero is still a success.
            diesel::delete(posts::table.find(id.value()))
                .execute(conn)
                .map_err(RepositoryError::from)?;

            Ok(())
        })
        .await
    }

    async fn list_posts(&self) -> RepositoryResult<Vec<Post>> {
        self.with_conn(|conn| {
            let rows = posts::table
                .select(PostRow::as_select())
                .order(posts::id.asc())
                .load::<PostRow>(conn)
                .map_err(RepositoryError::from)?;

            // Every decoded row lands in the result.
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn reset(&self) -> RepositoryResult<()> {
        self.with_conn(|conn| {
            conn.transaction(|tx| {
                diesel::delete(posts::table).execute(tx)?;
                sql_query("ALTER SEQUENCE posts_id_seq RESTART WITH 1").execute(tx)?;
                Ok(())
            })
            .map_err(RepositoryError::from)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = PostgresConfig::default();
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.min_pool_size, 1);
        assert_eq!(config.connection_timeout_sec, 30);
        assert_eq!(config.idle_timeout_sec, 600);
    }

    #[test]
    fn with_url_keeps_pool_defaults() {
        let config = PostgresConfig::with_url("postgres://localhost/posts");
        assert_eq!(config.database_url, "postgres://localhost/posts");
        assert_eq!(config.max_pool_size, 10);
    }
}
