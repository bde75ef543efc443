use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One logged concert attendance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: Uuid,
    pub show_date: NaiveDate,
    pub venue: String,
    pub band: String,
    pub created_at: DateTime<Utc>,
}

/// Validated insert payload. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub show_date: NaiveDate,
    pub venue: String,
    pub band: String,
}
