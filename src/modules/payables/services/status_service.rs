use std::sync::Arc;

use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::payables::models::InstallmentStatus;
use crate::modules::payables::repositories::{InstallmentStore, MySqlInstallmentRepository};

/// What happened to a status-change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChangeOutcome {
    /// The change was written to the store
    Applied { updated: u64 },
    /// Target was `Paid`: nothing was written, the caller must take the
    /// selection through the batch payment editor and commit via
    /// confirmation
    PaymentFlowRequired,
}

/// Drives the status transitions of the payables screens.
///
/// `Open -> Cancelled` and `Paid -> Open` apply immediately; moving rows to
/// `Paid` is only legal through the payment editor, so that target is
/// answered with `PaymentFlowRequired` instead of a write. Reopening clears
/// all payment metadata on the affected rows.
pub struct StatusService {
    store: Arc<dyn InstallmentStore>,
}

impl StatusService {
    pub fn new(store: Arc<dyn InstallmentStore>) -> Self {
        Self { store }
    }

    pub fn with_pool(pool: MySqlPool) -> Self {
        Self::new(Arc::new(MySqlInstallmentRepository::new(pool)))
    }

    pub async fn change_status(
        &self,
        ids: &[String],
        target: InstallmentStatus,
    ) -> Result<StatusChangeOutcome> {
        if ids.is_empty() {
            return Err(AppError::validation(
                "Select at least one installment to change status",
            ));
        }

        match target {
            InstallmentStatus::Paid => Ok(StatusChangeOutcome::PaymentFlowRequired),
            InstallmentStatus::Open => {
                // Reversal: the row update must also null out payment
                // date, timestamp, paid amount and paying bank
                let updated = self.store.update_status(ids, target, true).await?;
                info!(count = updated, "Installments reopened, payment data cleared");
                Ok(StatusChangeOutcome::Applied { updated })
            }
            InstallmentStatus::Cancelled => {
                let updated = self.store.update_status(ids, target, false).await?;
                info!(count = updated, "Installments cancelled");
                Ok(StatusChangeOutcome::Applied { updated })
            }
        }
    }
}
