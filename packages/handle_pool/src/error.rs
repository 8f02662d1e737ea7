use thiserror::Error;

/// Errors that can occur when configuring or operating handle pools.
///
/// None of these conditions is fatal to the caller's control loop: every operation reports
/// its outcome through its return value, and the worst possible outcome is a denied
/// acquisition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The pool was configured with a maximum size smaller than its initial size.
    #[error(
        "invalid pool configuration: max_size {max_size} is smaller than initial_size {initial_size}"
    )]
    InvalidConfiguration {
        /// The requested baseline number of pre-created handles.
        initial_size: usize,

        /// The requested hard cap on the total handle count.
        max_size: usize,
    },

    /// Every handle the pool is allowed to hold is currently issued.
    ///
    /// This is an expected, recoverable condition under bursty demand - retry after a
    /// release, or proceed without a handle.
    #[error("pool is saturated: all {max_size} handles are in use")]
    Exhausted {
        /// The hard cap that has been reached.
        max_size: usize,
    },

    /// The released handle is not currently issued by this pool.
    ///
    /// Indicates a double release or a release against the wrong pool. The release was a
    /// no-op.
    #[error("released handle is not currently issued by this pool")]
    UnknownHandle,

    /// A pool is already registered under the given key.
    #[error("a pool with key '{key}' is already registered")]
    DuplicateKey {
        /// The key that was already taken.
        key: String,
    },

    /// No pool is registered under the given key.
    #[error("no pool with key '{key}' is registered")]
    UnknownKey {
        /// The key that was looked up.
        key: String,
    },
}

/// A specialized `Result` type for handle pool operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn exhausted_is_error() {
        let error = Error::Exhausted { max_size: 8 };

        // Verify it is a valid Error that can be used in Result context.
        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }

    #[test]
    fn messages_carry_diagnostics() {
        let error = Error::InvalidConfiguration {
            initial_size: 4,
            max_size: 2,
        };
        assert!(error.to_string().contains('4'));
        assert!(error.to_string().contains('2'));

        let error = Error::UnknownKey {
            key: "missile".to_string(),
        };
        assert!(error.to_string().contains("missile"));
    }
}
