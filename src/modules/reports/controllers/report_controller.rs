use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::core::money::format_brl;
use crate::core::Result;
use crate::modules::reports::models::PayablesSummary;
use crate::modules::reports::services::ReportService;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub branch: Option<String>,
}

/// Response for GET /reports/payables-summary, amounts formatted for
/// direct display
#[derive(Debug, Serialize)]
pub struct PayablesSummaryResponse {
    pub total_open: String,
    pub total_overdue: String,
    pub total_due_this_week: String,
    pub total_due_this_month: String,
    pub total_paid: String,
    pub open_count: i64,
    pub overdue_count: i64,
}

impl From<PayablesSummary> for PayablesSummaryResponse {
    fn from(summary: PayablesSummary) -> Self {
        Self {
            total_open: format_brl(summary.total_open),
            total_overdue: format_brl(summary.total_overdue),
            total_due_this_week: format_brl(summary.total_due_this_week),
            total_due_this_month: format_brl(summary.total_due_this_month),
            total_paid: format_brl(summary.total_paid),
            open_count: summary.open_count,
            overdue_count: summary.overdue_count,
        }
    }
}

/// GET /reports/payables-summary
pub async fn payables_summary(
    query: web::Query<SummaryQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = ReportService::with_pool(pool.get_ref().clone());

    let today = chrono::Utc::now().date_naive();
    let summary = service
        .payables_summary(today, query.branch.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(PayablesSummaryResponse::from(summary)))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports").route("/payables-summary", web::get().to(payables_summary)),
    );
}
