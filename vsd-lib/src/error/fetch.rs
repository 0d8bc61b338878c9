//! The caller-facing fetch error

/// The single message every failed fetch reports to its caller.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to fetch data";

/// Broad category of a failed fetch.
///
/// The underlying cause is logged, not propagated; the kind is all a caller
/// gets to tell failures apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Building, sending or decoding the request failed.
    Transport,
    /// The configured result transform is not registered.
    Transform,
}

/// Error returned by [`VsdService::fetch`](crate::VsdService::fetch).
///
/// Always displays as [`FETCH_ERROR_MESSAGE`], whatever went wrong.
///
/// # Example
///
/// ```
/// use vsd_lib::error::{FetchError, FetchErrorKind, FETCH_ERROR_MESSAGE};
///
/// let error = FetchError::new(FetchErrorKind::Transport);
/// assert_eq!(error.to_string(), FETCH_ERROR_MESSAGE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", FETCH_ERROR_MESSAGE)]
pub struct FetchError {
    kind: FetchErrorKind,
}

impl FetchError {
    /// Creates a fetch error of the given kind.
    pub fn new(kind: FetchErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the category of the failure.
    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }
}

impl From<super::Error> for FetchError {
    fn from(error: super::Error) -> Self {
        Self::new(error.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::error::TransformError;
    use crate::error::TransportError;

    #[test]
    fn test_message_is_fixed() {
        let transport: FetchError = Error::from(TransportError::http(500, "boom")).into();
        let transform: FetchError = Error::from(TransformError::NotFound("x".into())).into();

        assert_eq!(transport.to_string(), FETCH_ERROR_MESSAGE);
        assert_eq!(transform.to_string(), FETCH_ERROR_MESSAGE);
        assert_eq!(transport.kind(), FetchErrorKind::Transport);
        assert_eq!(transform.kind(), FetchErrorKind::Transform);
    }
}
