pub mod batch_payment;
pub mod payment_editor;
pub mod status_service;
pub mod trash_service;

pub use batch_payment::BatchPaymentService;
pub use payment_editor::{EditorTotals, PaymentEditor};
pub use status_service::{StatusChangeOutcome, StatusService};
pub use trash_service::TrashService;
