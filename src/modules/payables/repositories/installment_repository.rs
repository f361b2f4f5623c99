use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::payables::models::filter::Page;
use crate::modules::payables::models::{
    Installment, InstallmentFilter, InstallmentStatus, PaymentRecord,
};

const SELECT_COLUMNS: &str = "id, bill_id, installment_number, total_installments, amount, \
     due_date, status, paid_amount, payment_date, paid_at, bank_account_id, \
     external_reference, notes, supplier_name, description, document_number, \
     category, branch, deleted_at, created_at, updated_at";

/// Persistence boundary for installment rows.
///
/// Services talk to this trait; the MySQL implementation below is the
/// production store and tests substitute in-memory fakes.
#[async_trait]
pub trait InstallmentStore: Send + Sync {
    /// Fetch rows by id, returned in the order the ids were given.
    /// Unknown ids are silently absent from the result.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Installment>>;

    /// Apply a confirmed payment batch: every row moves to `paid` with its
    /// payment metadata. The whole batch is one transaction, so a failing
    /// row leaves no half-applied batch behind.
    async fn apply_payments(&self, records: &[PaymentRecord]) -> Result<u64>;

    /// Update status for a set of rows. With `clear_payment_fields` the
    /// update also nulls payment date, timestamp, paid amount and paying
    /// bank (the reversal back to open).
    async fn update_status(
        &self,
        ids: &[String],
        status: InstallmentStatus,
        clear_payment_fields: bool,
    ) -> Result<u64>;

    /// Move rows to the trash by stamping `deleted_at`
    async fn soft_delete(&self, ids: &[String]) -> Result<u64>;

    /// Bring trashed rows back by clearing `deleted_at`
    async fn restore(&self, ids: &[String]) -> Result<u64>;
}

/// Repository for installment database operations
pub struct MySqlInstallmentRepository {
    pool: MySqlPool,
}

impl MySqlInstallmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Filtered, paginated listing for the browse screens, newest due date
    /// first. Returns the page plus the total row count for the filter.
    pub async fn list(
        &self,
        filter: &InstallmentFilter,
        page: Page,
    ) -> Result<(Vec<Installment>, i64)> {
        let mut count_qb = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM installments WHERE 1=1");
        push_filter(&mut count_qb, filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM installments WHERE 1=1",
            SELECT_COLUMNS
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY due_date DESC, installment_number ASC LIMIT ");
        qb.push_bind(page.limit);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset);

        let installments = qb
            .build_query_as::<Installment>()
            .fetch_all(&self.pool)
            .await?;

        Ok((installments, total))
    }

    /// All trashed rows, most recently deleted first
    pub async fn list_trashed(&self) -> Result<Vec<Installment>> {
        let installments = sqlx::query_as::<_, Installment>(&format!(
            "SELECT {} FROM installments WHERE deleted_at IS NOT NULL ORDER BY deleted_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(installments)
    }
}

#[async_trait]
impl InstallmentStore for MySqlInstallmentRepository {
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Installment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<MySql>::new(format!(
            "SELECT {} FROM installments WHERE deleted_at IS NULL AND id IN (",
            SELECT_COLUMNS
        ));
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        qb.push(")");

        let rows = qb
            .build_query_as::<Installment>()
            .fetch_all(&self.pool)
            .await?;

        // Return rows in the caller's order, not the database's
        let mut by_id: HashMap<String, Installment> =
            rows.into_iter().map(|inst| (inst.id.clone(), inst)).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn apply_payments(&self, records: &[PaymentRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;
        let mut updated = 0u64;

        for record in records {
            let result = sqlx::query(
                r#"
                UPDATE installments
                SET
                    status = 'paid',
                    paid_amount = ?,
                    payment_date = ?,
                    paid_at = ?,
                    bank_account_id = ?,
                    external_reference = ?,
                    notes = ?,
                    updated_at = ?
                WHERE id = ? AND deleted_at IS NULL
                "#,
            )
            .bind(record.paid_amount)
            .bind(record.payment_date)
            .bind(now)
            .bind(&record.bank_account_id)
            .bind(&record.external_reference)
            .bind(&record.notes)
            .bind(now)
            .bind(&record.installment_id)
            .execute(tx.as_mut())
            .await?;

            updated += result.rows_affected();
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn update_status(
        &self,
        ids: &[String],
        status: InstallmentStatus,
        clear_payment_fields: bool,
    ) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().naive_utc();

        let mut qb = QueryBuilder::<MySql>::new("UPDATE installments SET status = ");
        qb.push_bind(status.as_str());
        if clear_payment_fields {
            qb.push(
                ", payment_date = NULL, paid_at = NULL, paid_amount = NULL, \
                 bank_account_id = NULL",
            );
        }
        qb.push(", updated_at = ");
        qb.push_bind(now);
        qb.push(" WHERE deleted_at IS NULL AND id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        qb.push(")");

        let result = qb.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, ids: &[String]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().naive_utc();

        let mut qb = QueryBuilder::<MySql>::new("UPDATE installments SET deleted_at = ");
        qb.push_bind(now);
        qb.push(", updated_at = ");
        qb.push_bind(now);
        qb.push(" WHERE deleted_at IS NULL AND id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        qb.push(")");

        let result = qb.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    async fn restore(&self, ids: &[String]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().naive_utc();

        let mut qb = QueryBuilder::<MySql>::new("UPDATE installments SET deleted_at = NULL, updated_at = ");
        qb.push_bind(now);
        qb.push(" WHERE deleted_at IS NOT NULL AND id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        qb.push(")");

        let result = qb.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}

/// Append the filter's predicates to a query that already ends in a WHERE
/// clause
fn push_filter(qb: &mut QueryBuilder<'_, MySql>, filter: &InstallmentFilter) {
    if !filter.include_deleted {
        qb.push(" AND deleted_at IS NULL");
    }

    if let Some(statuses) = &filter.status {
        if !statuses.is_empty() {
            qb.push(" AND status IN (");
            let mut separated = qb.separated(", ");
            for status in statuses {
                separated.push_bind(status.as_str());
            }
            qb.push(")");
        }
    }

    if let Some(supplier) = &filter.supplier {
        qb.push(" AND supplier_name = ");
        qb.push_bind(supplier.clone());
    }

    if let Some(branch) = &filter.branch {
        qb.push(" AND branch = ");
        qb.push_bind(branch.clone());
    }

    if let Some(category) = &filter.category {
        qb.push(" AND category = ");
        qb.push_bind(category.clone());
    }

    if let Some(from) = filter.due_date_from {
        qb.push(" AND due_date >= ");
        qb.push_bind(from);
    }

    if let Some(to) = filter.due_date_to {
        qb.push(" AND due_date <= ");
        qb.push_bind(to);
    }

    if let Some(min) = filter.amount_from {
        qb.push(" AND amount >= ");
        qb.push_bind(min);
    }

    if let Some(max) = filter.amount_to {
        qb.push(" AND amount <= ");
        qb.push_bind(max);
    }
}
