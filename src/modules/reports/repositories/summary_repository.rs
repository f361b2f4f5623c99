use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::reports::models::PayablesSummary;

/// Aggregation queries behind the payables dashboard
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Summary relative to `today`, optionally scoped to one branch
    async fn payables_summary(
        &self,
        today: NaiveDate,
        branch: Option<&str>,
    ) -> Result<PayablesSummary>;
}

pub struct MySqlSummaryRepository {
    pool: MySqlPool,
}

impl MySqlSummaryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    total_open: Option<Decimal>,
    total_overdue: Option<Decimal>,
    total_due_this_week: Option<Decimal>,
    total_due_this_month: Option<Decimal>,
    total_paid: Option<Decimal>,
    open_count: i64,
    overdue_count: i64,
}

#[async_trait]
impl SummaryRepository for MySqlSummaryRepository {
    async fn payables_summary(
        &self,
        today: NaiveDate,
        branch: Option<&str>,
    ) -> Result<PayablesSummary> {
        let week_end = today.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        let month_end = last_day_of_month(today);

        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                SUM(CASE WHEN status = 'open' THEN amount END) AS total_open,
                SUM(CASE WHEN status = 'open' AND due_date < ? THEN amount END) AS total_overdue,
                SUM(CASE WHEN status = 'open' AND due_date >= ? AND due_date <= ? THEN amount END)
                    AS total_due_this_week,
                SUM(CASE WHEN status = 'open' AND due_date >= ? AND due_date <= ? THEN amount END)
                    AS total_due_this_month,
                SUM(CASE WHEN status = 'paid' THEN COALESCE(paid_amount, amount) END) AS total_paid,
                COUNT(CASE WHEN status = 'open' THEN 1 END) AS open_count,
                COUNT(CASE WHEN status = 'open' AND due_date < ? THEN 1 END) AS overdue_count
            FROM installments
            WHERE deleted_at IS NULL
              AND (? IS NULL OR branch = ?)
            "#,
        )
        .bind(today)
        .bind(today)
        .bind(week_end)
        .bind(today)
        .bind(month_end)
        .bind(today)
        .bind(branch)
        .bind(branch)
        .fetch_one(&self.pool)
        .await?;

        Ok(PayablesSummary {
            total_open: row.total_open.unwrap_or_default(),
            total_overdue: row.total_overdue.unwrap_or_default(),
            total_due_this_week: row.total_due_this_week.unwrap_or_default(),
            total_due_this_month: row.total_due_this_month.unwrap_or_default(),
            total_paid: row.total_paid.unwrap_or_default(),
            open_count: row.open_count,
            overdue_count: row.overdue_count,
        })
    }
}

/// Last calendar day of the month `date` falls in
fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}
