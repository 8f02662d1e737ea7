use std::fmt;

use crate::{HandleLifecycle, HandlePool, Result};

/// Builder for creating an instance of [`HandlePool`].
///
/// You only need to use this builder if you want to pre-warm or cap the pool.
/// The default configuration used by [`HandlePool::new()`][1] starts empty and unbounded.
///
/// # Examples
///
/// ```
/// use handle_pool::{HandlePool, IdLifecycle};
///
/// # fn main() -> handle_pool::Result<()> {
/// let pool = HandlePool::builder(IdLifecycle::new())
///     .initial_size(8)
///     .max_size(64)
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// [1]: HandlePool::new
#[must_use]
pub struct HandlePoolBuilder<L> {
    lifecycle: L,
    initial_size: usize,
    max_size: Option<usize>,
}

impl<L> fmt::Debug for HandlePoolBuilder<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlePoolBuilder")
            .field(
                "lifecycle_type",
                &format_args!("{}", std::any::type_name::<L>()),
            )
            .field("initial_size", &self.initial_size)
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl<L: HandleLifecycle> HandlePoolBuilder<L> {
    pub(crate) fn new(lifecycle: L) -> Self {
        Self {
            lifecycle,
            initial_size: 0,
            max_size: None,
        }
    }

    /// Sets the baseline number of handles the pool pre-creates at build time and shrinks
    /// back to on [`shrink()`][HandlePool::shrink].
    ///
    /// Pre-created handles are deactivated and placed in the free set, so the first
    /// `initial_size` acquisitions never invoke [`create()`][HandleLifecycle::create].
    ///
    /// Defaults to 0.
    pub fn initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// Sets the hard cap on the total number of handles the pool may ever hold, free and
    /// issued combined.
    ///
    /// Once the cap is reached and the free set is empty, acquisitions report
    /// [`Error::Exhausted`][crate::Error::Exhausted] until a handle is released.
    ///
    /// Defaults to unbounded.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Builds the handle pool with the specified configuration, pre-creating
    /// `initial_size` handles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`][crate::Error::InvalidConfiguration] if a cap
    /// was set that is smaller than the initial size.
    ///
    /// # Examples
    ///
    /// ```
    /// use handle_pool::{HandlePool, IdLifecycle};
    ///
    /// let result = HandlePool::builder(IdLifecycle::new())
    ///     .initial_size(4)
    ///     .max_size(2)
    ///     .build();
    ///
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> Result<HandlePool<L>> {
        HandlePool::new_inner(self.lifecycle, self.initial_size, self.max_size)
    }
}
