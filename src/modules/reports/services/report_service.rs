use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use crate::core::Result;
use crate::modules::reports::models::PayablesSummary;
use crate::modules::reports::repositories::{MySqlSummaryRepository, SummaryRepository};

/// Financial KPI reporting for the dashboard
pub struct ReportService {
    repository: Arc<dyn SummaryRepository>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn SummaryRepository>) -> Self {
        Self { repository }
    }

    pub fn with_pool(pool: MySqlPool) -> Self {
        Self::new(Arc::new(MySqlSummaryRepository::new(pool)))
    }

    pub async fn payables_summary(
        &self,
        today: NaiveDate,
        branch: Option<&str>,
    ) -> Result<PayablesSummary> {
        let summary = self.repository.payables_summary(today, branch).await?;

        debug!(
            open_count = summary.open_count,
            overdue_count = summary.overdue_count,
            "Payables summary computed"
        );

        Ok(summary)
    }
}
