use crate::traits::{Catalog, CatalogError, CatalogResult};
use async_trait::async_trait;
use mediabin_core::MediaRecord;
use sqlx::{PgPool, Row};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS media_file (
    id BIGSERIAL PRIMARY KEY,
    media_id VARCHAR(512) NOT NULL UNIQUE,
    content_type VARCHAR(255) NOT NULL
)";

/// Postgres-backed catalog implementation.
#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Connect and ensure the media_file table exists.
    pub async fn connect(database_url: &str) -> CatalogResult<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(backend_error)?;
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(backend_error)?;
        Ok(PostgresCatalog { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        PostgresCatalog { pool }
    }
}

#[async_trait]
impl Catalog for PostgresCatalog {
    async fn save(&self, media_id: &str, content_type: &str) -> CatalogResult<i64> {
        let row = sqlx::query(
            "INSERT INTO media_file (media_id, content_type) VALUES ($1, $2) RETURNING id",
        )
        .bind(media_id)
        .bind(content_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CatalogError::DuplicateMediaId(media_id.to_string())
            }
            _ => backend_error(e),
        })?;
        let id: i64 = row.get("id");
        tracing::info!(media_id, content_type, id, "Media file record stored");
        Ok(id)
    }

    async fn find_by_media_id(&self, media_id: &str) -> CatalogResult<Option<MediaRecord>> {
        let row = sqlx::query("SELECT id, media_id, content_type FROM media_file WHERE media_id = $1")
            .bind(media_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_error)?;
        Ok(row.map(|row| MediaRecord {
            id: row.get("id"),
            media_id: row.get("media_id"),
            content_type: row.get("content_type"),
        }))
    }

    async fn list_media_ids(&self) -> CatalogResult<Vec<String>> {
        let rows = sqlx::query("SELECT media_id FROM media_file ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(backend_error)?;
        Ok(rows.into_iter().map(|row| row.get("media_id")).collect())
    }
}

fn backend_error(err: sqlx::Error) -> CatalogError {
    CatalogError::Backend(err.to_string())
}
