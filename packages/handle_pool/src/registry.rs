use std::fmt;

use foldhash::{HashMap, HashMapExt};

use crate::{Error, HandleLifecycle, HandlePool, Result};

/// A keyed collection of [`HandlePool`]s, one per resource category.
///
/// The registry is the one coordinating structure above the pools themselves: it owns the
/// pools, routes acquire/release calls by key and manages pool teardown. An application
/// typically constructs one registry at startup and passes it by reference to whoever needs
/// pooled resources - there is no hidden global instance.
///
/// All pools in one registry share a lifecycle *type*; each pool owns its own lifecycle
/// *instance*, so different categories can be backed by differently configured hosts.
///
/// # Example
///
/// ```rust
/// use handle_pool::{HandlePoolRegistry, IdLifecycle};
///
/// # fn main() -> handle_pool::Result<()> {
/// let mut registry = HandlePoolRegistry::new();
///
/// registry.create_pool("missile", IdLifecycle::new(), 4, 16)?;
/// registry.create_pool("explosion", IdLifecycle::new(), 2, 8)?;
///
/// let missile = registry.acquire("missile")?;
/// registry.release("missile", missile)?;
///
/// // Tearing one category down destroys its handles.
/// registry.remove_pool("explosion")?;
/// # Ok(())
/// # }
/// ```
pub struct HandlePoolRegistry<L: HandleLifecycle> {
    /// One pool per category key. We use foldhash for better performance with small
    /// hash tables.
    pools: HashMap<String, HandlePool<L>>,
}

impl<L: HandleLifecycle> fmt::Debug for HandlePoolRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlePoolRegistry")
            .field("keys", &self.pools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<L: HandleLifecycle> Default for HandlePoolRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: HandleLifecycle> HandlePoolRegistry<L> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Creates and registers a pool under `key`, pre-creating `initial_size` handles and
    /// capping the pool at `max_size`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if a pool is already registered under `key` (the
    /// existing pool is untouched), or [`Error::InvalidConfiguration`] if
    /// `max_size < initial_size`.
    pub fn create_pool(
        &mut self,
        key: impl Into<String>,
        lifecycle: L,
        initial_size: usize,
        max_size: usize,
    ) -> Result<()> {
        let key = key.into();

        if self.pools.contains_key(&key) {
            return Err(Error::DuplicateKey { key });
        }

        let pool = HandlePool::builder(lifecycle)
            .initial_size(initial_size)
            .max_size(max_size)
            .build()?;

        self.pools.insert(key, pool);
        Ok(())
    }

    /// Acquires a handle from the pool registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no pool is registered under `key`, or
    /// [`Error::Exhausted`] if the named pool is saturated.
    pub fn acquire(&mut self, key: &str) -> Result<L::Handle> {
        self.pool_mut(key)?.acquire()
    }

    /// Releases an issued handle back to the pool registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no pool is registered under `key`, or
    /// [`Error::UnknownHandle`] if the handle is not currently issued by that pool.
    pub fn release(&mut self, key: &str, handle: L::Handle) -> Result<()> {
        self.pool_mut(key)?.release(handle)
    }

    /// Removes the pool registered under `key`, destroying every handle it holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no pool is registered under `key`.
    pub fn remove_pool(&mut self, key: &str) -> Result<()> {
        match self.pools.remove(key) {
            Some(pool) => {
                pool.destroy();
                Ok(())
            }
            None => Err(Error::UnknownKey {
                key: key.to_string(),
            }),
        }
    }

    /// Shrinks every registered pool back toward its baseline size, returning the total
    /// number of handles destroyed.
    pub fn shrink_all(&mut self) -> usize {
        self.pools.values_mut().map(HandlePool::shrink).sum()
    }

    /// Drops every registered pool *without* destroying any handle.
    ///
    /// Use this at host-environment teardown, when the environment reclaims all resources
    /// wholesale and per-handle destruction would be redundant.
    pub fn clear(&mut self) {
        for (_, pool) in self.pools.drain() {
            pool.disband();
        }
    }

    /// The pool registered under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&HandlePool<L>> {
        self.pools.get(key)
    }

    /// The pool registered under `key`, if any, for direct manipulation.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut HandlePool<L>> {
        self.pools.get_mut(key)
    }

    /// Whether a pool is registered under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pools.contains_key(key)
    }

    /// The number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether the registry has no pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    fn pool_mut(&mut self, key: &str) -> Result<&mut HandlePool<L>> {
        self.pools.get_mut(key).ok_or_else(|| Error::UnknownKey {
            key: key.to_string(),
        })
    }
}
