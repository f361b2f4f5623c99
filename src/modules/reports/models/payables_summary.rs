use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::payables::models::{Installment, InstallmentStatus};

/// Aggregate payables KPIs shown on the dashboard, per branch or for the
/// whole operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayablesSummary {
    /// Everything still open, overdue included
    pub total_open: Decimal,
    /// Open rows past their due date
    pub total_overdue: Decimal,
    /// Open rows due within the next seven days, today included
    pub total_due_this_week: Decimal,
    /// Open rows due in the current calendar month, today onward
    pub total_due_this_month: Decimal,
    /// Amounts actually paid (paid amount, falling back to the original)
    pub total_paid: Decimal,
    pub open_count: i64,
    pub overdue_count: i64,
}

impl PayablesSummary {
    /// Aggregate a set of installments relative to `today`. The clock is a
    /// parameter so the overdue split is a pure computation.
    pub fn from_installments(installments: &[Installment], today: NaiveDate) -> Self {
        let week_end = today
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX);
        let mut summary = Self::default();

        for inst in installments {
            if inst.is_trashed() {
                continue;
            }

            match inst.status {
                InstallmentStatus::Open => {
                    summary.total_open += inst.amount;
                    summary.open_count += 1;

                    if inst.due_date < today {
                        summary.total_overdue += inst.amount;
                        summary.overdue_count += 1;
                    } else {
                        if inst.due_date <= week_end {
                            summary.total_due_this_week += inst.amount;
                        }
                        if inst.due_date.year() == today.year()
                            && inst.due_date.month() == today.month()
                        {
                            summary.total_due_this_month += inst.amount;
                        }
                    }
                }
                InstallmentStatus::Paid => {
                    summary.total_paid += inst.paid_amount.unwrap_or(inst.amount);
                }
                InstallmentStatus::Cancelled => {}
            }
        }

        summary
    }
}
