pub mod bank_account;

pub use bank_account::{resolve_label, BankAccount};
