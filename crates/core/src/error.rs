//! Domain error types.

use thiserror::Error;

/// Errors a flow session can end with.
///
/// These never cross the controller's public API as `Err`; the controller
/// turns them into an `Error` stage and stores the rendered message on the
/// session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The normalized query matches no catalog entry.
    #[error("\"{query}\" not found. Try: {known}")]
    QueryNotFound { query: String, known: String },
}
