use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::modules::payables::models::payment_edit::AdjustmentKind;

/// One scheduled payment obligation belonging to a bill-to-pay.
///
/// Rows are owned by the installment store; the payment editor only ever
/// reads them. Payment metadata is populated when the row reaches `Paid`
/// and cleared again on reversal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Installment {
    pub id: String,
    pub bill_id: String,
    /// Position within the parent bill (1-based)
    pub installment_number: i32,
    pub total_installments: i32,
    /// The amount owed
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: InstallmentStatus,
    /// Amount actually paid, set when the row is marked paid
    pub paid_amount: Option<Decimal>,
    /// Calendar date the payment was made on
    pub payment_date: Option<NaiveDate>,
    /// Timestamp the payment was recorded at
    pub paid_at: Option<NaiveDateTime>,
    /// Paying bank account, explicit id reference
    pub bank_account_id: Option<String>,
    pub external_reference: Option<String>,
    pub notes: Option<String>,
    // Denormalized display columns for the listing screens
    pub supplier_name: Option<String>,
    pub description: Option<String>,
    pub document_number: Option<String>,
    pub category: Option<String>,
    pub branch: Option<String>,
    /// Soft-delete marker; trashed rows stay restorable
    pub deleted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Persisted installment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Awaiting payment
    Open,
    /// Payment recorded
    Paid,
    /// Written off, never to be paid
    Cancelled,
}

impl InstallmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for InstallmentStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "open" => Ok(Self::Open),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid installment status: {}", value)),
        }
    }
}

/// Presentational status; `Overdue` is never stored, it is an `Open` row
/// whose due date has passed relative to the clock the caller supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Open,
    Overdue,
    Paid,
    Cancelled,
}

impl DisplayStatus {
    /// Map a stored status plus due date into the status shown on screen.
    /// `today` is an explicit parameter so this stays testable without a
    /// mocked system clock.
    pub fn of(status: InstallmentStatus, due_date: NaiveDate, today: NaiveDate) -> Self {
        match status {
            InstallmentStatus::Open if due_date < today => Self::Overdue,
            InstallmentStatus::Open => Self::Open,
            InstallmentStatus::Paid => Self::Paid,
            InstallmentStatus::Cancelled => Self::Cancelled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Overdue => "Overdue",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl Installment {
    /// Presentational status for this row
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        DisplayStatus::of(self.status, self.due_date, today)
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Flattened payment details for one installment, produced by batch
/// confirmation. One record per selected installment, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub installment_id: String,
    pub paid_amount: Decimal,
    pub original_amount: Decimal,
    /// Resolved bank account id; `None` when no bank was chosen or the
    /// chosen label matched nothing in the directory
    pub bank_account_id: Option<String>,
    /// Always present: unset edit dates resolve to "today" at confirmation
    pub payment_date: NaiveDate,
    pub external_reference: Option<String>,
    pub adjustment_kind: AdjustmentKind,
    pub adjustment_amount: Decimal,
    pub notes: Option<String>,
}
