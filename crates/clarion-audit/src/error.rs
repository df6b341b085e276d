//! Audit error types.

/// Failure inside a pluggable audit component.
///
/// The [`Auditor`](crate::Auditor) never returns these to its caller; each
/// one is converted into an [`Issue`](crate::Issue) at the check boundary.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("rule engine failed: {0}")]
    Engine(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("invalid validator response: {0}")]
    Response(String),
    #[error("validator could not check the document: {0}")]
    Rejected(String),
    #[error("invalid WCAG level '{0}' (expected A, AA or AAA)")]
    InvalidLevel(String),
}
