// Invariants of the payables summary aggregation under arbitrary row sets.

use chrono::{Days, NaiveDate};
use paydesk::modules::payables::models::{Installment, InstallmentStatus};
use paydesk::modules::reports::models::PayablesSummary;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn installment(
    id: &str,
    amount: Decimal,
    due: NaiveDate,
    status: InstallmentStatus,
) -> Installment {
    let now = chrono::Utc::now().naive_utc();
    Installment {
        id: id.to_string(),
        bill_id: "bill-001".to_string(),
        installment_number: 1,
        total_installments: 1,
        amount,
        due_date: due,
        status,
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

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_week_window_crosses_month_boundary() {
    let today = date(2025, 6, 28);
    let installments = vec![
        installment("a", dec!(10.00), date(2025, 6, 30), InstallmentStatus::Open),
        installment("b", dec!(20.00), date(2025, 7, 2), InstallmentStatus::Open),
        installment("c", dec!(40.00), date(2025, 7, 10), InstallmentStatus::Open),
    ];

    let summary = PayablesSummary::from_installments(&installments, today);
    // The seven-day window reaches into July, the month bucket does not
    assert_eq!(summary.total_due_this_week, dec!(30.00));
    assert_eq!(summary.total_due_this_month, dec!(10.00));
}

#[test]
fn test_empty_input_yields_default() {
    let summary = PayablesSummary::from_installments(&[], date(2025, 6, 15));
    assert_eq!(summary, PayablesSummary::default());
}

fn arb_status() -> impl Strategy<Value = InstallmentStatus> {
    prop_oneof![
        Just(InstallmentStatus::Open),
        Just(InstallmentStatus::Paid),
        Just(InstallmentStatus::Cancelled),
    ]
}

fn arb_installments() -> impl Strategy<Value = Vec<Installment>> {
    prop::collection::vec(
        (1u64..1_000_000u64, 0u64..720u64, arb_status(), any::<bool>()),
        0..30,
    )
    .prop_map(|rows| {
        let base = date(2024, 1, 1);
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, day_offset, status, trashed))| {
                let due = base
                    .checked_add_days(Days::new(day_offset))
                    .unwrap_or(NaiveDate::MAX);
                let mut inst = installment(
                    &format!("i{}", i),
                    Decimal::from(cents) / Decimal::from(100),
                    due,
                    status,
                );
                if trashed {
                    inst.deleted_at = Some(chrono::Utc::now().naive_utc());
                }
                inst
            })
            .collect()
    })
}

proptest! {
    /// Overdue is always a subset of open, in amount and in count
    #[test]
    fn prop_overdue_never_exceeds_open(
        installments in arb_installments(),
        today_offset in 0u64..720u64,
    ) {
        let today = date(2024, 1, 1)
            .checked_add_days(Days::new(today_offset))
            .unwrap();
        let summary = PayablesSummary::from_installments(&installments, today);

        prop_assert!(summary.total_overdue <= summary.total_open);
        prop_assert!(summary.overdue_count <= summary.open_count);
        prop_assert!(summary.total_due_this_week <= summary.total_open - summary.total_overdue);
        prop_assert!(summary.total_due_this_month <= summary.total_open - summary.total_overdue);
    }

    /// The open total decomposes exactly into overdue and not-yet-due rows
    #[test]
    fn prop_open_total_decomposes(
        installments in arb_installments(),
        today_offset in 0u64..720u64,
    ) {
        let today = date(2024, 1, 1)
            .checked_add_days(Days::new(today_offset))
            .unwrap();
        let summary = PayablesSummary::from_installments(&installments, today);

        let upcoming: Decimal = installments
            .iter()
            .filter(|inst| {
                inst.deleted_at.is_none()
                    && inst.status == InstallmentStatus::Open
                    && inst.due_date >= today
            })
            .map(|inst| inst.amount)
            .sum();

        prop_assert_eq!(summary.total_open - summary.total_overdue, upcoming);
    }

    /// Trashed rows never contribute to any bucket
    #[test]
    fn prop_trashed_rows_are_invisible(installments in arb_installments()) {
        let today = date(2024, 6, 1);
        let kept: Vec<Installment> = installments
            .iter()
            .filter(|inst| inst.deleted_at.is_none())
            .cloned()
            .collect();

        prop_assert_eq!(
            PayablesSummary::from_installments(&installments, today),
            PayablesSummary::from_installments(&kept, today)
        );
    }
}
