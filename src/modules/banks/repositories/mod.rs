pub mod bank_account_repository;

pub use bank_account_repository::{BankDirectory, MySqlBankAccountRepository};
