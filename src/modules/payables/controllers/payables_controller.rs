use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::config::Config;
use crate::core::{AppError, Result};
use crate::modules::payables::models::filter::Page;
use crate::modules::payables::models::{Installment, InstallmentFilter, InstallmentStatus};
use crate::modules::payables::repositories::{InstallmentStore, MySqlInstallmentRepository};
use crate::modules::payables::services::{
    BatchPaymentService, PaymentEditor, StatusChangeOutcome, StatusService, TrashService,
};

/// Response for a single installment row
#[derive(Debug, Serialize)]
pub struct InstallmentResponse {
    pub id: String,
    pub bill_id: String,
    pub installment_number: i32,
    pub total_installments: i32,
    pub amount: String,
    pub due_date: String,
    pub status: String,
    pub display_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl InstallmentResponse {
    fn from_installment(installment: Installment, today: NaiveDate) -> Self {
        Self {
            id: installment.id.clone(),
            bill_id: installment.bill_id.clone(),
            installment_number: installment.installment_number,
            total_installments: installment.total_installments,
            amount: installment.amount.to_string(),
            due_date: installment.due_date.to_string(),
            status: installment.status.to_string(),
            display_status: installment.display_status(today).label().to_string(),
            paid_amount: installment.paid_amount.map(|v| v.to_string()),
            payment_date: installment.payment_date.map(|d| d.to_string()),
            bank_account_id: installment.bank_account_id,
            supplier_name: installment.supplier_name,
            description: installment.description,
            branch: installment.branch,
            deleted_at: installment.deleted_at.map(|dt| dt.to_string()),
        }
    }
}

/// Query parameters for GET /installments
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated status names, e.g. `open,paid`
    pub status: Option<String>,
    pub supplier: Option<String>,
    pub branch: Option<String>,
    pub category: Option<String>,
    pub due_date_from: Option<NaiveDate>,
    pub due_date_to: Option<NaiveDate>,
    pub amount_from: Option<rust_decimal::Decimal>,
    pub amount_to: Option<rust_decimal::Decimal>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    /// `default_limit` comes from the configured page size and applies
    /// when the query carries no explicit limit.
    fn into_filter_and_page(self, default_limit: u32) -> Result<(InstallmentFilter, Page)> {
        let status = match self.status {
            Some(raw) => {
                let statuses: std::result::Result<Vec<_>, _> = raw
                    .split(',')
                    .map(|s| InstallmentStatus::try_from(s.trim().to_string()))
                    .collect();
                Some(statuses.map_err(AppError::validation)?)
            }
            None => None,
        };

        let filter = InstallmentFilter {
            status,
            supplier: self.supplier,
            branch: self.branch,
            category: self.category,
            due_date_from: self.due_date_from,
            due_date_to: self.due_date_to,
            amount_from: self.amount_from,
            amount_to: self.amount_to,
            include_deleted: false,
        };

        let page = Page {
            limit: self.limit.unwrap_or(default_limit),
            offset: self.offset.unwrap_or(0),
        };

        Ok((filter, page))
    }
}

#[derive(Debug, Serialize)]
pub struct ListInstallmentsResponse {
    pub installments: Vec<InstallmentResponse>,
    pub total: i64,
}

/// GET /installments
///
/// Filtered, paginated installment listing, newest due date first.
/// Trashed rows are excluded.
pub async fn list_installments(
    query: web::Query<ListQuery>,
    config: web::Data<Config>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let (filter, page) = query
        .into_inner()
        .into_filter_and_page(config.app.default_page_size)?;
    let repository = MySqlInstallmentRepository::new(pool.get_ref().clone());

    let (installments, total) = repository.list(&filter, page).await?;

    let today = chrono::Utc::now().date_naive();
    let response = ListInstallmentsResponse {
        installments: installments
            .into_iter()
            .map(|inst| InstallmentResponse::from_installment(inst, today))
            .collect(),
        total,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Request for POST /installments/status
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub ids: Vec<String>,
    pub target: InstallmentStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StatusChangeResponse {
    Applied { updated: u64 },
    /// Marking rows paid never happens here; the client must collect
    /// payment details and POST /installments/payments
    PaymentFlowRequired,
}

/// POST /installments/status
pub async fn change_status(
    request: web::Json<StatusChangeRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = StatusService::with_pool(pool.get_ref().clone());

    let outcome = service
        .change_status(&request.ids, request.target)
        .await?;

    let response = match outcome {
        StatusChangeOutcome::Applied { updated } => StatusChangeResponse::Applied { updated },
        StatusChangeOutcome::PaymentFlowRequired => StatusChangeResponse::PaymentFlowRequired,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// One row of a batch payment request. Omitted fields keep their editor
/// defaults: the original amount, and today's date.
#[derive(Debug, Deserialize)]
pub struct PaymentRowRequest {
    pub installment_id: String,
    /// Raw text from the amount field; parsed leniently, never rejected
    pub paid_amount: Option<String>,
    pub payment_date: Option<NaiveDate>,
    /// Bank label as shown in the picker
    pub paying_account: Option<String>,
    pub external_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchPaymentRequest {
    pub rows: Vec<PaymentRowRequest>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchPaymentResponse {
    pub confirmed: usize,
    pub original_total: String,
    pub paid_total: String,
    pub total_discount: String,
    pub total_interest: String,
}

/// Distinct installment ids in first-seen order. Requests may repeat an
/// id; each installment is still selected once.
fn selection_ids(rows: &[PaymentRowRequest]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    rows.iter()
        .map(|r| r.installment_id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// POST /installments/payments
///
/// Batch payment confirmation: loads the selected installments in request
/// order, replays the per-row overrides through the payment editor, then
/// confirms the whole batch in one store call.
pub async fn confirm_payments(
    request: web::Json<BatchPaymentRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let repository = MySqlInstallmentRepository::new(pool.get_ref().clone());

    let ids = selection_ids(&request.rows);
    let installments = repository.find_by_ids(&ids).await?;

    if installments.len() != ids.len() {
        return Err(AppError::not_found(
            "One or more selected installments no longer exist",
        ));
    }

    let mut editor = PaymentEditor::new();
    editor.initialize(installments);
    editor.set_notes(request.notes);

    for row in &request.rows {
        if let Some(amount) = &row.paid_amount {
            editor.set_paid_amount_text(&row.installment_id, amount);
        }
        editor.set_payment_date(&row.installment_id, row.payment_date);
        editor.set_paying_account(&row.installment_id, row.paying_account.clone());
        editor.set_external_reference(&row.installment_id, row.external_reference.clone());
    }

    let totals = editor.totals();
    let service = BatchPaymentService::with_pool(pool.get_ref().clone());
    let outcome = service.confirm(&editor).await?;

    let response = BatchPaymentResponse {
        confirmed: outcome.confirmed_count(),
        original_total: totals.original_total.to_string(),
        paid_total: totals.paid_total.to_string(),
        total_discount: totals.total_discount.to_string(),
        total_interest: totals.total_interest.to_string(),
    };

    Ok(HttpResponse::Ok().json(response))
}

#[derive(Debug, Deserialize)]
pub struct TrashRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TrashResponse {
    pub affected: u64,
}

/// POST /installments/trash
pub async fn move_to_trash(
    request: web::Json<TrashRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = TrashService::with_pool(pool.get_ref().clone());
    let affected = service.move_to_trash(&request.ids).await?;

    Ok(HttpResponse::Ok().json(TrashResponse { affected }))
}

/// POST /installments/restore
pub async fn restore_from_trash(
    request: web::Json<TrashRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = TrashService::with_pool(pool.get_ref().clone());
    let affected = service.restore(&request.ids).await?;

    Ok(HttpResponse::Ok().json(TrashResponse { affected }))
}

/// GET /installments/trash
pub async fn list_trash(pool: web::Data<MySqlPool>) -> Result<HttpResponse> {
    let repository = MySqlInstallmentRepository::new(pool.get_ref().clone());
    let installments = repository.list_trashed().await?;

    let today = chrono::Utc::now().date_naive();
    let response: Vec<InstallmentResponse> = installments
        .into_iter()
        .map(|inst| InstallmentResponse::from_installment(inst, today))
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Configure payables routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/installments")
            .route("", web::get().to(list_installments))
            .route("/status", web::post().to(change_status))
            .route("/payments", web::post().to(confirm_payments))
            .route("/trash", web::get().to(list_trash))
            .route("/trash", web::post().to(move_to_trash))
            .route("/restore", web::post().to(restore_from_trash)),
    );
}
