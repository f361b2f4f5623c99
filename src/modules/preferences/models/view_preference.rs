use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Saved per-view UI preferences (column layouts, saved filters), keyed by
/// a stable view identifier such as `"payables.installments"`.
///
/// Kept as an explicit persisted service rather than ambient browser
/// storage so every screen reads and writes preferences the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewPreference {
    pub view_key: String,
    /// Opaque JSON payload owned by the view that saved it
    pub payload: serde_json::Value,
    pub updated_at: NaiveDateTime,
}
