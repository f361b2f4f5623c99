use std::sync::Arc;

use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::payables::repositories::{InstallmentStore, MySqlInstallmentRepository};

/// Soft-delete and restore for installment rows.
///
/// Trashed rows keep all their data and disappear from normal listings
/// until restored; nothing is ever physically removed here.
pub struct TrashService {
    store: Arc<dyn InstallmentStore>,
}

impl TrashService {
    pub fn new(store: Arc<dyn InstallmentStore>) -> Self {
        Self { store }
    }

    pub fn with_pool(pool: MySqlPool) -> Self {
        Self::new(Arc::new(MySqlInstallmentRepository::new(pool)))
    }

    pub async fn move_to_trash(&self, ids: &[String]) -> Result<u64> {
        if ids.is_empty() {
            return Err(AppError::validation("Select at least one installment to delete"));
        }

        let deleted = self.store.soft_delete(ids).await?;
        info!(count = deleted, "Installments moved to trash");
        Ok(deleted)
    }

    pub async fn restore(&self, ids: &[String]) -> Result<u64> {
        if ids.is_empty() {
            return Err(AppError::validation("Select at least one installment to restore"));
        }

        let restored = self.store.restore(ids).await?;
        info!(count = restored, "Installments restored from trash");
        Ok(restored)
    }
}
