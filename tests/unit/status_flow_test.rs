// Status transition rules: marking paid is deferred to the payment flow,
// reopening clears payment metadata, cancellation does not.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use paydesk::core::Result;
use paydesk::modules::payables::models::{
    DisplayStatus, Installment, InstallmentStatus, PaymentRecord,
};
use paydesk::modules::payables::repositories::InstallmentStore;
use paydesk::modules::payables::services::{StatusChangeOutcome, StatusService};

#[derive(Debug, Clone, PartialEq)]
struct StatusCall {
    ids: Vec<String>,
    status: InstallmentStatus,
    clear_payment_fields: bool,
}

#[derive(Default)]
struct RecordingStore {
    status_calls: Mutex<Vec<StatusCall>>,
}

impl RecordingStore {
    fn calls(&self) -> Vec<StatusCall> {
        self.status_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InstallmentStore for RecordingStore {
    async fn find_by_ids(&self, _ids: &[String]) -> Result<Vec<Installment>> {
        Ok(Vec::new())
    }

    async fn apply_payments(&self, _records: &[PaymentRecord]) -> Result<u64> {
        Ok(0)
    }

    async fn update_status(
        &self,
        ids: &[String],
        status: InstallmentStatus,
        clear_payment_fields: bool,
    ) -> Result<u64> {
        self.status_calls.lock().unwrap().push(StatusCall {
            ids: ids.to_vec(),
            status,
            clear_payment_fields,
        });
        Ok(ids.len() as u64)
    }

    async fn soft_delete(&self, _ids: &[String]) -> Result<u64> {
        Ok(0)
    }

    async fn restore(&self, _ids: &[String]) -> Result<u64> {
        Ok(0)
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_target_paid_requires_payment_flow() {
    let store = Arc::new(RecordingStore::default());
    let service = StatusService::new(store.clone());

    let outcome = service
        .change_status(&ids(&["i1", "i2"]), InstallmentStatus::Paid)
        .await
        .unwrap();

    assert_eq!(outcome, StatusChangeOutcome::PaymentFlowRequired);
    // Nothing was written
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_reopening_clears_payment_fields() {
    let store = Arc::new(RecordingStore::default());
    let service = StatusService::new(store.clone());

    let outcome = service
        .change_status(&ids(&["i1", "i2", "i3"]), InstallmentStatus::Open)
        .await
        .unwrap();

    assert_eq!(outcome, StatusChangeOutcome::Applied { updated: 3 });

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].ids, ids(&["i1", "i2", "i3"]));
    assert_eq!(calls[0].status, InstallmentStatus::Open);
    assert!(calls[0].clear_payment_fields);
}

#[tokio::test]
async fn test_cancelling_keeps_payment_fields() {
    let store = Arc::new(RecordingStore::default());
    let service = StatusService::new(store.clone());

    let outcome = service
        .change_status(&ids(&["i1"]), InstallmentStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(outcome, StatusChangeOutcome::Applied { updated: 1 });

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].status, InstallmentStatus::Cancelled);
    assert!(!calls[0].clear_payment_fields);
}

#[tokio::test]
async fn test_empty_selection_is_rejected() {
    let store = Arc::new(RecordingStore::default());
    let service = StatusService::new(store.clone());

    let result = service.change_status(&[], InstallmentStatus::Cancelled).await;

    assert!(result.is_err());
    assert!(store.calls().is_empty());
}

#[test]
fn test_overdue_is_derived_not_stored() {
    let due = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let before = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
    let after = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();

    // Same stored row, different clock
    assert_eq!(
        DisplayStatus::of(InstallmentStatus::Open, due, before),
        DisplayStatus::Open
    );
    assert_eq!(
        DisplayStatus::of(InstallmentStatus::Open, due, due),
        DisplayStatus::Open
    );
    assert_eq!(
        DisplayStatus::of(InstallmentStatus::Open, due, after),
        DisplayStatus::Overdue
    );

    // Only open rows can read as overdue
    assert_eq!(
        DisplayStatus::of(InstallmentStatus::Paid, due, after),
        DisplayStatus::Paid
    );
    assert_eq!(
        DisplayStatus::of(InstallmentStatus::Cancelled, due, after),
        DisplayStatus::Cancelled
    );

    // "overdue" is not accepted as a stored status
    assert!(InstallmentStatus::try_from("overdue".to_string()).is_err());
}
