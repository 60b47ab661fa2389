//! Database module for post storage.
//!
//! This module provides abstractions for database operations via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, binary)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Validation & logging     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴───────────────┐
//!     │ LocalRepository (in-memory)   │
//!     │ PostgresRepository (Diesel)   │
//!     └───────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! **Use the service layer:**
//! ```ignore
//! use posts_api::db::{services, RepositoryFactory, RepositoryType};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::create(RepositoryType::from_env()).await?;
//!     let posts = services::list_posts(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

// Feature flag priority: postgres > local
// When multiple features are enabled (e.g., --all-features), postgres takes precedence.
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, PostRepository, RepositoryError, RepositoryResult,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn PostRepository>> = OnceLock::new();

/// Initialize the global repository singleton for the selected backend.
///
/// Backend selection honors the `REPOSITORY_TYPE` environment override and
/// otherwise falls back to Postgres when connection configuration is
/// present. Selecting a backend whose feature is not compiled in is an
/// error, not a silent fallback.
pub async fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::create(RepositoryType::from_env())
        .await
        .context("Failed to initialize repository backend")?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn PostRepository>> {
    REPOSITORY
        .get()
        .context("Database not initialized. Call init_repository() first.")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Must keep working when the postgres feature is compiled in: the env
    // override selects the local backend without any connection config.
    #[tokio::test]
    async fn init_repository_honors_repository_type_override() {
        std::env::set_var("REPOSITORY_TYPE", "local");

        init_repository().await.unwrap();
        let repo = get_repository().unwrap();
        assert!(repo.health_check().await.unwrap());

        std::env::remove_var("REPOSITORY_TYPE");
    }
}
