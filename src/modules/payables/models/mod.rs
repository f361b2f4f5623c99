pub mod filter;
pub mod installment;
pub mod payment_edit;

pub use filter::InstallmentFilter;
pub use installment::{DisplayStatus, Installment, InstallmentStatus, PaymentRecord};
pub use payment_edit::{Adjustment, AdjustmentKind, PaymentEdit};
