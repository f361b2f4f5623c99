use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::preferences::models::ViewPreference;

/// Storage for per-view UI preferences
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn find(&self, view_key: &str) -> Result<Option<ViewPreference>>;

    /// Insert or replace the payload for a view key
    async fn upsert(&self, view_key: &str, payload: &serde_json::Value) -> Result<()>;
}

pub struct MySqlPreferenceRepository {
    pool: MySqlPool,
}

impl MySqlPreferenceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PreferenceRow {
    view_key: String,
    payload: Json<serde_json::Value>,
    updated_at: NaiveDateTime,
}

impl From<PreferenceRow> for ViewPreference {
    fn from(row: PreferenceRow) -> Self {
        Self {
            view_key: row.view_key,
            payload: row.payload.0,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PreferenceRepository for MySqlPreferenceRepository {
    async fn find(&self, view_key: &str) -> Result<Option<ViewPreference>> {
        let row = sqlx::query_as::<_, PreferenceRow>(
            r#"
            SELECT view_key, payload, updated_at
            FROM view_preferences
            WHERE view_key = ?
            "#,
        )
        .bind(view_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ViewPreference::from))
    }

    async fn upsert(&self, view_key: &str, payload: &serde_json::Value) -> Result<()> {
        let now = chrono::Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO view_preferences (view_key, payload, updated_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE payload = VALUES(payload), updated_at = VALUES(updated_at)
            "#,
        )
        .bind(view_key)
        .bind(Json(payload))
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
