use thiserror::Error;

/// Errors that can occur when acquiring instances from an [`InstancePool`][crate::InstancePool].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller provided a key that is not part of the closed set of keys
    /// enumerated by [`PoolKey::variants()`][crate::PoolKey::variants].
    #[error("invalid pool key: '{key}' is not one of the known variants")]
    InvalidKey {
        /// A human-readable rendition of the rejected key.
        key: String,
    },
}

/// A specialized `Result` type for instance pool operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
