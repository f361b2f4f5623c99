// Batch confirmation against in-memory fakes: selection order, shared
// payment date, bank label resolution, transactional failure propagation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use paydesk::core::{AppError, Result};
use paydesk::modules::banks::models::BankAccount;
use paydesk::modules::banks::repositories::BankDirectory;
use paydesk::modules::payables::models::{
    AdjustmentKind, Installment, InstallmentStatus, PaymentRecord,
};
use paydesk::modules::payables::repositories::InstallmentStore;
use paydesk::modules::payables::services::{BatchPaymentService, PaymentEditor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Default)]
struct FakeStore {
    applied: Mutex<Vec<Vec<PaymentRecord>>>,
    apply_calls: AtomicUsize,
    fail_apply: bool,
}

impl FakeStore {
    fn failing() -> Self {
        Self {
            fail_apply: true,
            ..Default::default()
        }
    }

    fn applied_batches(&self) -> Vec<Vec<PaymentRecord>> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl InstallmentStore for FakeStore {
    async fn find_by_ids(&self, _ids: &[String]) -> Result<Vec<Installment>> {
        Ok(Vec::new())
    }

    async fn apply_payments(&self, records: &[PaymentRecord]) -> Result<u64> {
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_apply {
            return Err(AppError::internal("connection reset"));
        }
        self.applied.lock().unwrap().push(records.to_vec());
        Ok(records.len() as u64)
    }

    async fn update_status(
        &self,
        _ids: &[String],
        _status: InstallmentStatus,
        _clear_payment_fields: bool,
    ) -> Result<u64> {
        Ok(0)
    }

    async fn soft_delete(&self, _ids: &[String]) -> Result<u64> {
        Ok(0)
    }

    async fn restore(&self, _ids: &[String]) -> Result<u64> {
        Ok(0)
    }
}

struct FakeDirectory {
    accounts: Vec<BankAccount>,
}

impl FakeDirectory {
    fn with(accounts: Vec<BankAccount>) -> Self {
        Self { accounts }
    }

    fn empty() -> Self {
        Self::with(Vec::new())
    }
}

#[async_trait]
impl BankDirectory for FakeDirectory {
    async fn list_active(&self) -> Result<Vec<BankAccount>> {
        Ok(self.accounts.clone())
    }
}

fn installment(id: &str, amount: Decimal) -> Installment {
    let now = chrono::Utc::now().naive_utc();
    Installment {
        id: id.to_string(),
        bill_id: "bill-001".to_string(),
        installment_number: 1,
        total_installments: 1,
        amount,
        due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        status: InstallmentStatus::Open,
        paid_amount: None,
        payment_date: None,
        paid_at: None,
        bank_account_id: None,
        external_reference: None,
        notes: None,
        supplier_name: None,
        description: None,
        document_number: None,
        category: None,
        branch: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn account(id: &str, label: &str) -> BankAccount {
    BankAccount {
        id: id.to_string(),
        label: label.to_string(),
        account_number: None,
        agency: None,
        active: true,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[tokio::test]
async fn test_confirm_emits_records_in_selection_order() {
    let store = Arc::new(FakeStore::default());
    let service = BatchPaymentService::new(store.clone(), Arc::new(FakeDirectory::empty()));

    let mut editor = PaymentEditor::new();
    editor.initialize(vec![
        installment("c", dec!(50.00)),
        installment("a", dec!(100.00)),
        installment("b", dec!(250.00)),
    ]);

    let outcome = service.confirm_on(&editor, today()).await.unwrap();

    assert_eq!(outcome.confirmed_count(), 3);
    let ids: Vec<&str> = outcome
        .records
        .iter()
        .map(|r| r.installment_id.as_str())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);

    // The store received exactly one batch, same order
    let batches = store.applied_batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], outcome.records);
}

#[tokio::test]
async fn test_unset_payment_dates_share_one_resolved_date() {
    let store = Arc::new(FakeStore::default());
    let service = BatchPaymentService::new(store, Arc::new(FakeDirectory::empty()));

    let mut editor = PaymentEditor::new();
    editor.initialize(vec![
        installment("a", dec!(100.00)),
        installment("b", dec!(250.00)),
        installment("c", dec!(75.00)),
    ]);
    // One row with an explicit date, the other two unset
    let explicit = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    editor.set_payment_date("b", Some(explicit));

    let outcome = service.confirm_on(&editor, today()).await.unwrap();

    assert_eq!(outcome.records[0].payment_date, today());
    assert_eq!(outcome.records[1].payment_date, explicit);
    assert_eq!(outcome.records[2].payment_date, today());
}

#[tokio::test]
async fn test_empty_editor_confirms_without_touching_store() {
    let store = Arc::new(FakeStore::default());
    let service = BatchPaymentService::new(store.clone(), Arc::new(FakeDirectory::empty()));

    let outcome = service
        .confirm_on(&PaymentEditor::new(), today())
        .await
        .unwrap();

    assert_eq!(outcome.confirmed_count(), 0);
    assert_eq!(store.apply_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bank_labels_resolve_to_account_ids() {
    let store = Arc::new(FakeStore::default());
    let directory = FakeDirectory::with(vec![
        account("b1", "Banco Alfa"),
        account("b2", "Banco Beta"),
    ]);
    let service = BatchPaymentService::new(store, Arc::new(directory));

    let mut editor = PaymentEditor::new();
    editor.initialize(vec![
        installment("a", dec!(100.00)),
        installment("b", dec!(200.00)),
        installment("c", dec!(300.00)),
    ]);
    editor.set_paying_account("a", Some("Banco Beta".to_string()));
    editor.set_paying_account("b", Some("Banco Fantasma".to_string()));

    let outcome = service.confirm_on(&editor, today()).await.unwrap();

    assert_eq!(outcome.records[0].bank_account_id.as_deref(), Some("b2"));
    // Unmatched label and no label both mean "no account chosen"
    assert!(outcome.records[1].bank_account_id.is_none());
    assert!(outcome.records[2].bank_account_id.is_none());
}

#[tokio::test]
async fn test_adjustments_and_notes_flow_onto_records() {
    let store = Arc::new(FakeStore::default());
    let service = BatchPaymentService::new(store, Arc::new(FakeDirectory::empty()));

    let mut editor = PaymentEditor::new();
    editor.initialize(vec![
        installment("a", dec!(100.00)),
        installment("b", dec!(200.00)),
    ]);
    editor.set_paid_amount("a", dec!(90.00));
    editor.set_paid_amount("b", dec!(215.00));
    editor.set_notes(Some("lote semanal".to_string()));

    let outcome = service.confirm_on(&editor, today()).await.unwrap();

    let a = &outcome.records[0];
    assert_eq!(a.adjustment_kind, AdjustmentKind::Discount);
    assert_eq!(a.adjustment_amount, dec!(10.00));
    assert_eq!(a.original_amount, dec!(100.00));

    let b = &outcome.records[1];
    assert_eq!(b.adjustment_kind, AdjustmentKind::Interest);
    assert_eq!(b.adjustment_amount, dec!(15.00));

    assert!(outcome
        .records
        .iter()
        .all(|r| r.notes.as_deref() == Some("lote semanal")));
}

#[tokio::test]
async fn test_store_failure_propagates_and_editor_survives() {
    let store = Arc::new(FakeStore::failing());
    let service = BatchPaymentService::new(store, Arc::new(FakeDirectory::empty()));

    let mut editor = PaymentEditor::new();
    editor.initialize(vec![installment("a", dec!(100.00))]);
    editor.set_paid_amount("a", dec!(80.00));

    let result = service.confirm_on(&editor, today()).await;
    assert!(result.is_err());

    // The edit state is untouched, so the caller can retry as-is
    assert_eq!(editor.edit("a").unwrap().paid_amount, dec!(80.00));
    assert_eq!(editor.len(), 1);
}
