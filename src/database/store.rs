use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::database::models::{NewShow, Show};

/// Errors from the show store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("{0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence seam for the `shows` table.
///
/// Implementations own all persisted state; callers hold nothing between
/// requests. Concurrent writes are serialized by the implementation.
#[async_trait]
pub trait ShowStore: Send + Sync {
    async fn insert(&self, show: NewShow) -> Result<(), DatabaseError>;

    /// Delete by id, returning the number of rows removed. Zero is not an error.
    async fn delete(&self, id: &str) -> Result<u64, DatabaseError>;

    /// Shows with `from <= show_date <= to`, ordered by `(show_date, created_at)`
    async fn select_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Show>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
