//! Error types for reconciliation.

use pingping_client::ApiError;
use pingping_types::CheckKind;
use thiserror::Error;

/// Errors that abort a reconciliation.
///
/// None of these are retried, and writes issued before the error are not
/// rolled back.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A call to the web API failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A name-based lookup matched more than one monitor.
    #[error("More than one monitor with name exists: {name}")]
    Ambiguous { name: String },

    /// A check referenced a monitor that does not exist.
    #[error("No matching monitor found: {name}")]
    MonitorNotFound { name: String },

    /// The monitor exists but carries no check of the requested kind.
    #[error("Monitor {monitor} has no {check} check")]
    CheckNotFound { monitor: String, check: CheckKind },

    /// The supplied parameters are not a valid combination.
    #[error("{0}")]
    InvalidParams(String),
}
