pub mod payables_summary;

pub use payables_summary::PayablesSummary;
