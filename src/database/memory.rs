use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{NewShow, Show};
use crate::database::store::{DatabaseError, ShowStore};

/// In-process show store for local runs and tests.
///
/// Rows are kept in insertion order, so a stable sort on `show_date` alone
/// preserves `created_at` order for same-day entries even when two inserts
/// share a timestamp.
#[derive(Default)]
pub struct MemoryShowStore {
    rows: RwLock<Vec<Show>>,
}

impl MemoryShowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ShowStore for MemoryShowStore {
    async fn insert(&self, show: NewShow) -> Result<(), DatabaseError> {
        // Same non-blank constraints as the postgres table
        for (column, value) in [("venue", &show.venue), ("band", &show.band)] {
            if value.trim().is_empty() {
                return Err(DatabaseError::QueryError(format!(
                    "new row for relation \"shows\" violates check constraint \"shows_{}_check\"",
                    column
                )));
            }
        }

        let mut rows = self.rows.write().await;
        rows.push(Show {
            id: Uuid::new_v4(),
            show_date: show.show_date,
            venue: show.venue,
            band: show.band,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<u64, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(0);
        };

        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn select_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Show>, DatabaseError> {
        let rows = self.rows.read().await;
        let mut matched: Vec<Show> = rows
            .iter()
            .filter(|row| from <= row.show_date && row.show_date <= to)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.show_date.cmp(&b.show_date));
        Ok(matched)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
