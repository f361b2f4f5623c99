//! PayDesk Accounts-Payable Back-Office Service
//!
//! This library provides the core functionality for the PayDesk payables
//! management system: installment browsing, batch payment reconciliation,
//! status transitions, trash, and financial KPI reporting.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::banks;
pub use modules::payables;
pub use modules::preferences;
pub use modules::reports;
