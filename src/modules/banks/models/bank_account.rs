use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bank account staff can pay from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BankAccount {
    pub id: String,
    /// Display label ("Banco Alfa"), unique among active accounts
    pub label: String,
    pub account_number: Option<String>,
    pub agency: Option<String>,
    pub active: bool,
}

/// Resolve a free-text bank label against the directory.
///
/// The steady-state data model references accounts by id; label matching
/// exists only for the payment editor's free-text field, where an
/// unmatched label means "no account chosen".
pub fn resolve_label<'a>(accounts: &'a [BankAccount], label: &str) -> Option<&'a BankAccount> {
    accounts.iter().find(|account| account.label == label)
}
