use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::database::models::{NewShow, Show};
use crate::database::store::{DatabaseError, ShowStore};

const SELECT_RANGE: &str = r#"
    SELECT id, show_date, venue, band, created_at
    FROM shows
    WHERE show_date >= $1
    AND show_date <= $2
    ORDER BY show_date ASC, created_at ASC
"#;

const INSERT: &str = "INSERT INTO shows (show_date, venue, band) VALUES ($1, $2, $3)";

const DELETE_BY_ID: &str = "DELETE FROM shows WHERE id = $1";

/// PostgreSQL-backed show store
#[derive(Clone)]
pub struct ShowRepository {
    pool: PgPool,
}

impl ShowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShowStore for ShowRepository {
    async fn insert(&self, show: NewShow) -> Result<(), DatabaseError> {
        sqlx::query(INSERT)
            .bind(show.show_date)
            .bind(&show.venue)
            .bind(&show.band)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<u64, DatabaseError> {
        // Ids are UUIDs; anything else cannot match a row
        let Ok(id) = Uuid::parse_str(id) else {
            debug!("Delete skipped for non-UUID id: {}", id);
            return Ok(0);
        };

        let result = sqlx::query(DELETE_BY_ID).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn select_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Show>, DatabaseError> {
        let rows = sqlx::query_as::<_, Show>(SELECT_RANGE)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
