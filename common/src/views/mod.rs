//! Output views for the various resources the provisioning API serves.

use serde::{Deserialize, Serialize};

mod inventory;
pub use inventory::*;

mod vni;
pub use vni::*;

mod work_order;
pub use work_order::*;

/// An error response from an API endpoint. The console's own services use
/// this shape everywhere; the legacy inventory backend sends a bare
/// `{"detail": ...}` body instead, which clients fold into `message`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    /// An optional error code that can be used to identify the type of error
    /// that occurred.
    pub code: Option<String>,

    /// A human-readable message describing the error that occurred.
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response body of the execute endpoints. The server message, when
/// present, is surfaced verbatim in the success notification.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExecutionOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Free-form log line the backend records for the execution attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_log: Option<String>,
}
