use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::money::parse_amount;
use crate::modules::banks::models::{resolve_label, BankAccount};
use crate::modules::payables::models::{
    Adjustment, AdjustmentKind, Installment, PaymentEdit, PaymentRecord,
};

/// Aggregate view of the current edit state, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorTotals {
    pub original_total: Decimal,
    pub paid_total: Decimal,
    pub total_discount: Decimal,
    pub total_interest: Decimal,
    /// `total_discount - total_interest`; negative when interest dominates
    pub net_savings: Decimal,
}

/// Stateful editor for a batch of installment payments.
///
/// Holds one mutable `PaymentEdit` per selected installment, keyed by
/// installment id, and keeps the derived adjustment consistent with user
/// edits. The selection order is retained so confirmation can emit records
/// in exactly the order the installments arrived.
///
/// No operation here fails: malformed numeric input degrades to zero and
/// edits for unknown installment ids are ignored.
#[derive(Debug, Default)]
pub struct PaymentEditor {
    installments: Vec<Installment>,
    edits: HashMap<String, PaymentEdit>,
    notes: Option<String>,
}

impl PaymentEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one edit per installment with `paid_amount = amount` and no
    /// adjustment. Replaces any prior state; edits for ids not in the new
    /// selection are dropped.
    pub fn initialize(&mut self, installments: Vec<Installment>) {
        self.edits = installments
            .iter()
            .map(|inst| (inst.id.clone(), PaymentEdit::seeded(inst.amount)))
            .collect();
        self.installments = installments;
        self.notes = None;
    }

    /// Reseed every edit from the installment amounts and clear the notes,
    /// keeping the selection.
    pub fn reset(&mut self) {
        let installments = std::mem::take(&mut self.installments);
        self.initialize(installments);
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    pub fn edit(&self, installment_id: &str) -> Option<&PaymentEdit> {
        self.edits.get(installment_id)
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Set the paid amount for one installment and recompute its
    /// adjustment. Negative input is clamped to zero; other entries are
    /// untouched.
    pub fn set_paid_amount(&mut self, installment_id: &str, amount: Decimal) {
        let original = match self
            .installments
            .iter()
            .find(|inst| inst.id == installment_id)
        {
            Some(inst) => inst.amount,
            None => return,
        };

        if let Some(edit) = self.edits.get_mut(installment_id) {
            let paid = amount.max(Decimal::ZERO);
            edit.paid_amount = paid;
            edit.adjustment = Adjustment::classify(original, paid);
        }
    }

    /// Same as `set_paid_amount` but for raw text from the amount field.
    /// Unparseable input resolves to zero, which then classifies as a full
    /// discount against the original amount.
    pub fn set_paid_amount_text(&mut self, installment_id: &str, input: &str) {
        self.set_paid_amount(installment_id, parse_amount(input));
    }

    pub fn set_paying_account(&mut self, installment_id: &str, label: Option<String>) {
        if let Some(edit) = self.edits.get_mut(installment_id) {
            edit.paying_account = label.filter(|l| !l.is_empty());
        }
    }

    pub fn set_payment_date(&mut self, installment_id: &str, date: Option<NaiveDate>) {
        if let Some(edit) = self.edits.get_mut(installment_id) {
            edit.payment_date = date;
        }
    }

    pub fn set_external_reference(&mut self, installment_id: &str, reference: Option<String>) {
        if let Some(edit) = self.edits.get_mut(installment_id) {
            edit.external_reference = reference.filter(|r| !r.is_empty());
        }
    }

    /// Batch-level free text copied onto every emitted record.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.is_empty());
    }

    /// Sum the current edit state. Pure read, no side effects.
    pub fn totals(&self) -> EditorTotals {
        let original_total: Decimal = self.installments.iter().map(|inst| inst.amount).sum();

        let mut paid_total = Decimal::ZERO;
        let mut total_discount = Decimal::ZERO;
        let mut total_interest = Decimal::ZERO;

        for inst in &self.installments {
            if let Some(edit) = self.edits.get(&inst.id) {
                paid_total += edit.paid_amount;
                match edit.adjustment.kind {
                    AdjustmentKind::Discount => total_discount += edit.adjustment.amount,
                    AdjustmentKind::Interest => total_interest += edit.adjustment.amount,
                    AdjustmentKind::None => {}
                }
            }
        }

        EditorTotals {
            original_total,
            paid_total,
            total_discount,
            total_interest,
            net_savings: total_discount - total_interest,
        }
    }

    /// Flatten the edit state into one payment record per installment, in
    /// selection order.
    ///
    /// `today` is computed once by the caller so every row with an unset
    /// date shares the same resolved date. A missing edit falls back to
    /// paying the original amount with no adjustment. Bank labels that
    /// match nothing in the directory resolve to `None` rather than
    /// failing.
    pub fn build_records(&self, today: NaiveDate, banks: &[BankAccount]) -> Vec<PaymentRecord> {
        self.installments
            .iter()
            .map(|inst| {
                let fallback = PaymentEdit::seeded(inst.amount);
                let edit = self.edits.get(&inst.id).unwrap_or(&fallback);

                let bank_account_id = edit
                    .paying_account
                    .as_deref()
                    .and_then(|label| resolve_label(banks, label))
                    .map(|bank| bank.id.clone());

                PaymentRecord {
                    installment_id: inst.id.clone(),
                    paid_amount: edit.paid_amount,
                    original_amount: inst.amount,
                    bank_account_id,
                    payment_date: edit.payment_date.unwrap_or(today),
                    external_reference: edit.external_reference.clone(),
                    adjustment_kind: edit.adjustment.kind,
                    adjustment_amount: edit.adjustment.amount,
                    notes: self.notes.clone(),
                }
            })
            .collect()
    }
}
