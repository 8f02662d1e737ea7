use std::fmt;

use foldhash::{HashSet, HashSetExt};

use crate::{Error, HandleLifecycle, HandlePoolBuilder, Result};

/// A bounded pool of reusable handles to host-managed resources.
///
/// The pool hands out handles on [`acquire()`][Self::acquire], reclaims them on
/// [`release()`][Self::release] and can shrink back to its baseline size with
/// [`shrink()`][Self::shrink]. It minimizes creation/destruction churn by keeping released
/// handles around for reuse instead of destroying them.
///
/// Every handle the pool has created is in exactly one of two collections at any moment:
///
/// * the **free set** - deactivated handles available for reuse, kept in stack order so the
///   most recently released handle is the first one reissued;
/// * the **spawned set** - handles currently issued to callers.
///
/// The sum of the two never exceeds the configured cap.
///
/// # Saturation
///
/// A pool whose cap is reached and whose free set is empty is *saturated*. Acquisition from
/// a saturated pool reports [`Error::Exhausted`] and nothing else happens; transient
/// unavailability is an expected condition in interactive use, not a programming error.
///
/// # Teardown
///
/// Dropping the pool destroys every handle it still holds, issued or not, through the
/// lifecycle. [`destroy()`][Self::destroy] does the same thing explicitly and, because it
/// consumes the pool, a destroyed pool cannot be used again. Callers must not retain handles
/// past either. To drop the pool *without* destroying its handles (for example when the host
/// environment is being torn down wholesale and will reclaim the resources itself), use
/// [`disband()`][Self::disband].
///
/// # Example
///
/// ```rust
/// use handle_pool::{HandlePool, IdLifecycle};
///
/// # fn main() -> handle_pool::Result<()> {
/// let mut pool = HandlePool::builder(IdLifecycle::new())
///     .initial_size(1)
///     .max_size(2)
///     .build()?;
///
/// let first = pool.acquire()?;
/// let second = pool.acquire()?;
///
/// // Saturated - denied, not fatal.
/// assert!(pool.acquire().is_err());
///
/// pool.release(first)?;
/// pool.release(second)?;
///
/// // Back to the baseline size, destroying the one excess handle.
/// assert_eq!(pool.shrink(), 1);
/// assert_eq!(pool.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct HandlePool<L: HandleLifecycle> {
    /// The host-supplied lifecycle through which all resource operations flow.
    lifecycle: L,

    /// Handles available for reuse, deactivated. `Vec` used as a stack: the most recently
    /// released handle sits at the top and is the first one reissued, which keeps a "warm"
    /// subset of handles cycling.
    free: Vec<L::Handle>,

    /// Handles currently issued to callers. We use foldhash for better performance with
    /// small hash tables.
    spawned: HashSet<L::Handle>,

    /// Baseline handle count: pre-created at construction, restored by `shrink()`.
    initial_size: usize,

    /// Hard cap on `free + spawned`, or `None` for an unbounded pool.
    max_size: Option<usize>,
}

impl<L: HandleLifecycle> fmt::Debug for HandlePool<L> {
    #[cfg_attr(test, mutants::skip)] // Formatting output carries no behavior to verify.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlePool")
            .field(
                "lifecycle_type",
                &format_args!("{}", std::any::type_name::<L>()),
            )
            .field("free", &self.free.len())
            .field("spawned", &self.spawned.len())
            .field("initial_size", &self.initial_size)
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl<L: HandleLifecycle> HandlePool<L> {
    /// Creates a new [`HandlePool`] with the default configuration: no pre-created handles
    /// and no cap.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::{HandlePool, IdLifecycle};
    ///
    /// let mut pool = HandlePool::new(IdLifecycle::new());
    /// assert!(pool.is_empty());
    /// ```
    #[must_use]
    pub fn new(lifecycle: L) -> Self {
        Self::builder(lifecycle)
            .build()
            .expect("the default configuration has no cap and cannot be invalid")
    }

    /// Starts building a new [`HandlePool`] around the given lifecycle.
    ///
    /// Use this when you want to pre-warm the pool or cap its growth.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::{HandlePool, IdLifecycle};
    ///
    /// # fn main() -> handle_pool::Result<()> {
    /// let pool = HandlePool::builder(IdLifecycle::new())
    ///     .initial_size(8)
    ///     .max_size(64)
    ///     .build()?;
    ///
    /// assert_eq!(pool.free_len(), 8);
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(lifecycle: L) -> HandlePoolBuilder<L> {
        HandlePoolBuilder::new(lifecycle)
    }

    pub(crate) fn new_inner(
        mut lifecycle: L,
        initial_size: usize,
        max_size: Option<usize>,
    ) -> Result<Self> {
        if let Some(max_size) = max_size
            && max_size < initial_size
        {
            return Err(Error::InvalidConfiguration {
                initial_size,
                max_size,
            });
        }

        let mut free = Vec::with_capacity(initial_size);

        for _ in 0..initial_size {
            let handle = lifecycle.create();
            lifecycle.deactivate(&handle);
            free.push(handle);
        }

        Ok(Self {
            lifecycle,
            free,
            spawned: HashSet::new(),
            initial_size,
            max_size,
        })
    }

    /// Acquires a handle, activating it before it is returned.
    ///
    /// The most recently released free handle is reissued first. If the free set is empty
    /// and the pool is below its cap, a new handle is created on the spot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] if the pool is [saturated][Self::is_saturated]. This is
    /// an expected, recoverable condition; retry after a release or proceed without a
    /// handle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::{HandlePool, IdLifecycle};
    ///
    /// # fn main() -> handle_pool::Result<()> {
    /// let mut pool = HandlePool::builder(IdLifecycle::new()).max_size(1).build()?;
    ///
    /// let handle = pool.acquire()?;
    /// assert!(pool.acquire().is_err());
    ///
    /// pool.release(handle)?;
    /// assert!(pool.acquire().is_ok());
    /// # Ok(())
    /// # }
    /// ```
    pub fn acquire(&mut self) -> Result<L::Handle> {
        if let Some(handle) = self.free.pop() {
            self.lifecycle.activate(&handle);
            self.spawned.insert(handle.clone());
            return Ok(handle);
        }

        // The free set is empty; grow if the cap allows it.
        if let Some(max_size) = self.max_size
            && self.spawned.len() >= max_size
        {
            return Err(Error::Exhausted { max_size });
        }

        let handle = self.lifecycle.create();
        self.lifecycle.activate(&handle);
        self.spawned.insert(handle.clone());
        Ok(handle)
    }

    /// Returns an issued handle to the pool, deactivating it and making it the next handle
    /// to be reissued.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHandle`] if the handle is not currently issued by this pool -
    /// a double release, or a handle from a different pool. The release is then a no-op,
    /// so caller bugs of this kind cannot corrupt the pool's bookkeeping.
    pub fn release(&mut self, handle: L::Handle) -> Result<()> {
        if !self.spawned.remove(&handle) {
            return Err(Error::UnknownHandle);
        }

        self.lifecycle.deactivate(&handle);
        self.free.push(handle);
        Ok(())
    }

    /// Destroys excess free handles until the total handle count is back at the baseline,
    /// returning the number destroyed.
    ///
    /// Only free handles are destroyed, oldest-released first; issued handles are never
    /// touched. If more handles are issued than the baseline allows for, the pool shrinks
    /// as far as the free set permits and the remainder becomes reclaimable once those
    /// handles are released.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::{HandlePool, IdLifecycle};
    ///
    /// # fn main() -> handle_pool::Result<()> {
    /// let mut pool = HandlePool::builder(IdLifecycle::new()).initial_size(2).build()?;
    ///
    /// let handles: Vec<_> = (0..5).map(|_| pool.acquire()).collect::<Result<_, _>>()?;
    /// for handle in handles {
    ///     pool.release(handle)?;
    /// }
    ///
    /// assert_eq!(pool.shrink(), 3);
    /// assert_eq!(pool.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn shrink(&mut self) -> usize {
        let excess = self.len().saturating_sub(self.initial_size);
        let removable = excess.min(self.free.len());

        // Oldest-released handles sit at the bottom of the stack.
        for handle in self.free.drain(..removable) {
            self.lifecycle.destroy(handle);
        }

        removable
    }

    /// Destroys every handle the pool holds, issued or not, and consumes the pool.
    ///
    /// Callers must not retain handles past this call; the resources behind them are gone.
    /// Dropping the pool has the same effect, so this method exists to make teardown
    /// explicit at call sites.
    pub fn destroy(mut self) {
        self.destroy_all();
    }

    /// Drops the pool without destroying any handle.
    ///
    /// Use this when the host environment is being torn down wholesale and will reclaim
    /// the resources itself, making per-handle destruction redundant.
    pub fn disband(mut self) {
        self.free.clear();
        self.spawned.clear();
    }

    fn destroy_all(&mut self) {
        for handle in self.free.drain(..) {
            self.lifecycle.destroy(handle);
        }

        for handle in self.spawned.drain() {
            self.lifecycle.destroy(handle);
        }
    }

    /// The number of handles available for immediate reuse.
    #[must_use]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// The number of handles currently issued to callers.
    #[must_use]
    pub fn spawned_len(&self) -> usize {
        self.spawned.len()
    }

    /// The total number of handles the pool holds, free and issued combined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.free
            .len()
            .checked_add(self.spawned.len())
            .expect("total handle count cannot exceed the address space")
    }

    /// Whether the pool holds no handles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty() && self.spawned.is_empty()
    }

    /// The baseline handle count the pool was configured with.
    #[must_use]
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// The hard cap on the total handle count, or `None` for an unbounded pool.
    #[must_use]
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Whether the pool can issue no further handle right now: the free set is empty and
    /// the cap is reached.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.free.is_empty()
            && self
                .max_size
                .is_some_and(|max_size| self.spawned.len() >= max_size)
    }
}

impl<L: HandleLifecycle> Drop for HandlePool<L> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}
