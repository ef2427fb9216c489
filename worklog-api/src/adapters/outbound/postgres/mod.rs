//! PostgreSQL stores, selected with `database.backend: postgres`.

mod logged_work;
mod projects;
mod users;

pub use logged_work::PostgresLoggedWorkRepository;
pub use projects::PostgresProjectRepository;
pub use users::PostgresUserRepository;

use thiserror::Error;

use crate::domain::WorklogError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Unknown role in users table: {0}")]
    UnknownRole(String),
}

impl RepositoryError {
    fn is_unique_violation(&self) -> bool {
        matches!(self, Self::DatabaseError(sqlx::Error::Database(db)) if db.is_unique_violation())
    }
}

impl From<RepositoryError> for WorklogError {
    fn from(e: RepositoryError) -> Self {
        tracing::error!(error = %e, "repository failure");
        WorklogError::storage(e.to_string())
    }
}
