pub mod bank_account_controller;

pub use bank_account_controller::configure;
