use std::sync::Arc;

use sqlx::MySqlPool;
use tracing::info;

use crate::core::Result;
use crate::modules::banks::repositories::{BankDirectory, MySqlBankAccountRepository};
use crate::modules::payables::models::PaymentRecord;
use crate::modules::payables::repositories::{InstallmentStore, MySqlInstallmentRepository};
use crate::modules::payables::services::PaymentEditor;

/// Result of one confirmed batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// Records handed to the store, in selection order
    pub records: Vec<PaymentRecord>,
}

impl BatchOutcome {
    pub fn confirmed_count(&self) -> usize {
        self.records.len()
    }
}

/// Turns a finished payment editor into persisted payments.
///
/// Flattens the edit state into one record per installment and hands the
/// whole ordered batch to the store in a single call. The store applies it
/// transactionally, so a persistence failure leaves no half-applied batch;
/// the editor state is untouched on failure and the caller may retry. No
/// retry policy lives here.
pub struct BatchPaymentService {
    store: Arc<dyn InstallmentStore>,
    banks: Arc<dyn BankDirectory>,
}

impl BatchPaymentService {
    pub fn new(store: Arc<dyn InstallmentStore>, banks: Arc<dyn BankDirectory>) -> Self {
        Self { store, banks }
    }

    /// Production wiring against the MySQL repositories
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self::new(
            Arc::new(MySqlInstallmentRepository::new(pool.clone())),
            Arc::new(MySqlBankAccountRepository::new(pool)),
        )
    }

    /// Confirm the batch using the current wall-clock date for rows with
    /// no payment date set.
    pub async fn confirm(&self, editor: &PaymentEditor) -> Result<BatchOutcome> {
        self.confirm_on(editor, chrono::Utc::now().date_naive()).await
    }

    /// Confirm the batch resolving unset payment dates to `today`.
    ///
    /// `today` is resolved once per batch, not per row, so every unset row
    /// shares the same date. An empty editor confirms trivially without
    /// touching the store.
    pub async fn confirm_on(
        &self,
        editor: &PaymentEditor,
        today: chrono::NaiveDate,
    ) -> Result<BatchOutcome> {
        if editor.is_empty() {
            return Ok(BatchOutcome { records: Vec::new() });
        }

        let bank_accounts = self.banks.list_active().await?;
        let records = editor.build_records(today, &bank_accounts);

        let updated = self.store.apply_payments(&records).await?;

        info!(
            batch_size = records.len(),
            rows_updated = updated,
            "Payment batch confirmed"
        );

        Ok(BatchOutcome { records })
    }
}
