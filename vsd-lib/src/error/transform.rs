//! Result transform error types

/// Errors raised while dispatching a result transform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The configuration names a transform that was never registered.
    #[error("Transform not found: {0}")]
    NotFound(String),
}
