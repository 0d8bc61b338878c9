//! Error types

mod fetch;
mod transform;
mod transport;
mod vsd;

pub use fetch::*;
pub use transform::*;
pub use transport::*;
pub use vsd::*;

/// Top-level error for operations that expose the underlying cause.
///
/// [`VsdService::fetch`](crate::VsdService::fetch) deliberately masks its
/// failures behind [`FetchError`]; lower-level building blocks return this
/// type instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to build or perform a request.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A result transform could not be applied.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl Error {
    /// Returns the kind reported to callers when this error is masked.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport(_) => FetchErrorKind::Transport,
            Self::Transform(_) => FetchErrorKind::Transform,
        }
    }
}
