//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating repository instances based on
//! runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{PostRepository, RepositoryError, RepositoryResult};
#[cfg(feature = "postgres-repo")]
use super::PostgresConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Postgres when connection
    /// configuration is present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or_else(|e| {
                log::warn!("ignoring REPOSITORY_TYPE, using local backend: {}", e);
                Self::Local
            });
        }

        let has_pg_config = std::env::var("DATABASE_URL").is_ok()
            || std::env::var("PG_DATABASE_URL").is_ok()
            || std::env::var("APP_DB_NAME").is_ok();
        if has_pg_config {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub async fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn PostRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config =
                        PostgresConfig::from_env().map_err(RepositoryError::ConfigurationError)?;
                    let pg = Self::create_postgres(&config)?;
                    Ok(pg as Arc<dyn PostRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::ConfigurationError(
                        "Postgres repository feature not enabled".to_string(),
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a Postgres repository from an explicit configuration.
    #[cfg(feature = "postgres-repo")]
    pub fn create_postgres(config: &PostgresConfig) -> RepositoryResult<Arc<PostgresRepository>> {
        let repo = PostgresRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn PostRepository> {
        Arc::new(LocalRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_type_parses_known_names() {
        assert_eq!("postgres".parse::<RepositoryType>().unwrap(), RepositoryType::Postgres);
        assert_eq!("pg".parse::<RepositoryType>().unwrap(), RepositoryType::Postgres);
        assert_eq!("LOCAL".parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        assert!("sqlite".parse::<RepositoryType>().is_err());
    }

    #[test]
    fn repository_type_parse_reports_typos() {
        let err = "postgress".parse::<RepositoryType>().unwrap_err();
        assert!(err.contains("postgress"), "error should name the bad value: {err}");
    }

    #[tokio::test]
    async fn factory_creates_local_repository() {
        let repo = RepositoryFactory::create(RepositoryType::Local).await.unwrap();
        assert!(repo.health_check().await.unwrap());
    }
}
