pub mod banks;
pub mod payables;
pub mod preferences;
pub mod reports;
