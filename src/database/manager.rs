use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::database::memory::MemoryShowStore;
use crate::database::repository::ShowRepository;
use crate::database::store::{DatabaseError, ShowStore};

const CREATE_SHOWS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS shows (
        id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
        show_date date NOT NULL,
        venue text NOT NULL CHECK (btrim(venue) <> ''),
        band text NOT NULL CHECK (btrim(band) <> ''),
        created_at timestamptz NOT NULL DEFAULT now()
    )
"#;

const CREATE_SHOWS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS shows_show_date_created_at_idx ON shows (show_date, created_at)";

/// Builds the configured show store
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &AppConfig) -> Result<Arc<dyn ShowStore>, DatabaseError> {
        match config.store.backend {
            StoreBackend::Memory => {
                info!("Using in-memory show store");
                Ok(Arc::new(MemoryShowStore::new()))
            }
            StoreBackend::Postgres => {
                let pool = Self::pool(config).await?;
                Self::ensure_schema(&pool).await?;
                Ok(Arc::new(ShowRepository::new(pool)))
            }
        }
    }

    async fn pool(config: &AppConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .database
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool for: {}", Self::redact(url));
        Ok(pool)
    }

    /// Idempotent bootstrap of the single `shows` table
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_SHOWS_TABLE).execute(pool).await?;
        sqlx::query(CREATE_SHOWS_INDEX).execute(pool).await?;
        Ok(())
    }

    /// Connection string with the password masked, for logging
    fn redact(database_url: &str) -> String {
        match url::Url::parse(database_url) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.into()
            }
            Err(_) => "<unparseable DATABASE_URL>".to_string(),
        }
    }
}
