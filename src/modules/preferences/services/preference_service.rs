use std::sync::Arc;

use sqlx::MySqlPool;
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::preferences::models::ViewPreference;
use crate::modules::preferences::repositories::{
    MySqlPreferenceRepository, PreferenceRepository,
};

/// Persisted-preferences service injected into the view layer. Screens
/// never touch storage directly; they go through here with their view key.
pub struct PreferenceService {
    repository: Arc<dyn PreferenceRepository>,
}

impl PreferenceService {
    pub fn new(repository: Arc<dyn PreferenceRepository>) -> Self {
        Self { repository }
    }

    pub fn with_pool(pool: MySqlPool) -> Self {
        Self::new(Arc::new(MySqlPreferenceRepository::new(pool)))
    }

    pub async fn get(&self, view_key: &str) -> Result<Option<ViewPreference>> {
        Self::validate_key(view_key)?;
        self.repository.find(view_key).await
    }

    pub async fn save(&self, view_key: &str, payload: serde_json::Value) -> Result<()> {
        Self::validate_key(view_key)?;
        self.repository.upsert(view_key, &payload).await?;
        debug!(view_key, "View preference saved");
        Ok(())
    }

    fn validate_key(view_key: &str) -> Result<()> {
        if view_key.trim().is_empty() {
            return Err(AppError::validation("View key must not be empty"));
        }
        Ok(())
    }
}
