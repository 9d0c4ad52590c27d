use thiserror::Error;

/// Errors that can occur when registering, cloning or unregistering prototypes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No prototype is registered under the requested name.
    #[error("incorrect object identifier: {name}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// Part of the object graph cannot be duplicated faithfully.
    ///
    /// Retrying does not help: the same graph will fail the same way until the offending
    /// part is removed from the registered prototype.
    #[error("cannot deep-copy attribute '{path}': {reason}")]
    CopyFailure {
        /// Where in the object graph the copy failed, e.g. `owner.sessions[2]`.
        path: String,

        /// A human-readable description of the problem.
        reason: String,
    },

    /// An attribute that only accepts one kind of value was given another kind.
    #[error("attribute '{attribute}' expects a {expected} value but was given a {found} value")]
    AttributeType {
        /// The attribute being set.
        attribute: String,

        /// The kind of value the attribute accepts.
        expected: &'static str,

        /// The kind of value that was supplied.
        found: &'static str,
    },
}

/// A specialized `Result` type for prototype registry operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn not_found_names_identifier() {
        let error = Error::NotFound {
            name: "ka-cg-1".to_string(),
        };

        assert_eq!(error.to_string(), "incorrect object identifier: ka-cg-1");
    }

    #[test]
    fn copy_failure_names_path() {
        let error = Error::CopyFailure {
            path: "owner.session".to_string(),
            reason: "live handle 'db' cannot be duplicated".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "cannot deep-copy attribute 'owner.session': live handle 'db' cannot be duplicated"
        );
    }
}
