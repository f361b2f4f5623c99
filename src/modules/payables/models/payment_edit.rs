use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::adjustment_epsilon;

/// Classification of the delta between an installment's original amount
/// and the amount actually paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Paid amount matches the original (within one cent)
    None,
    /// Paid less than owed
    Discount,
    /// Paid more than owed
    Interest,
}

impl AdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Discount => "discount",
            Self::Interest => "interest",
        }
    }
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified adjustment: kind plus the absolute delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub amount: Decimal,
}

impl Adjustment {
    pub fn none() -> Self {
        Self {
            kind: AdjustmentKind::None,
            amount: Decimal::ZERO,
        }
    }

    /// Classify the delta between original and paid amounts.
    ///
    /// Discount iff `original - paid > 0.01`, interest iff
    /// `paid - original > 0.01`, otherwise no adjustment. The amount is
    /// always the absolute delta, zero for `None`.
    pub fn classify(original: Decimal, paid: Decimal) -> Self {
        let delta = original - paid;
        let epsilon = adjustment_epsilon();

        if delta > epsilon {
            Self {
                kind: AdjustmentKind::Discount,
                amount: delta,
            }
        } else if -delta > epsilon {
            Self {
                kind: AdjustmentKind::Interest,
                amount: -delta,
            }
        } else {
            Self::none()
        }
    }
}

/// Ephemeral per-installment edit state, alive only while the batch
/// payment editor is open. Never persisted; only the flattened
/// `PaymentRecord` is sent onward.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEdit {
    pub paid_amount: Decimal,
    pub adjustment: Adjustment,
    /// Free-text bank label chosen in the editor, resolved against the
    /// directory at confirmation time
    pub paying_account: Option<String>,
    /// Unset means "today", resolved at confirmation and not before
    pub payment_date: Option<NaiveDate>,
    /// Free-text identifier, e.g. a transfer code
    pub external_reference: Option<String>,
}

impl PaymentEdit {
    /// Fresh edit seeded from the installment's original amount
    pub fn seeded(original_amount: Decimal) -> Self {
        Self {
            paid_amount: original_amount,
            adjustment: Adjustment::none(),
            paying_account: None,
            payment_date: None,
            external_reference: None,
        }
    }
}
