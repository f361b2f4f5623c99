use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::modules::payables::models::InstallmentStatus;

/// Filter criteria for the installment listing screens.
///
/// Every field is optional; unset fields add no predicate. Trashed rows
/// are excluded unless `include_deleted` is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstallmentFilter {
    pub status: Option<Vec<InstallmentStatus>>,
    pub supplier: Option<String>,
    pub branch: Option<String>,
    pub category: Option<String>,
    pub due_date_from: Option<NaiveDate>,
    pub due_date_to: Option<NaiveDate>,
    pub amount_from: Option<Decimal>,
    pub amount_to: Option<Decimal>,
    #[serde(default)]
    pub include_deleted: bool,
}

impl InstallmentFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.supplier.is_none()
            && self.branch.is_none()
            && self.category.is_none()
            && self.due_date_from.is_none()
            && self.due_date_to.is_none()
            && self.amount_from.is_none()
            && self.amount_to.is_none()
            && !self.include_deleted
    }
}

/// Page window for listings; defaults match the original 50-row pages.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Page {
    #[serde(default = "Page::default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Page {
    fn default_limit() -> u32 {
        50
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::default_limit(),
            offset: 0,
        }
    }
}
