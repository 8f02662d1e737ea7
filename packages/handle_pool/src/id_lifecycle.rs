use crate::HandleLifecycle;

/// A lifecycle that mints plain numeric handles and manages no host resources.
///
/// Activation, deactivation and destruction are no-ops. This is useful when the pool is
/// used purely to meter concurrency - the handles carry no payload, but acquiring one still
/// consumes a slot under the pool's cap - and as the simplest possible lifecycle for tests
/// and examples.
///
/// # Example
///
/// ```rust
/// use handle_pool::{HandlePool, IdLifecycle};
///
/// # fn main() -> handle_pool::Result<()> {
/// // At most 4 of some external activity may run at once.
/// let mut slots = HandlePool::builder(IdLifecycle::new()).max_size(4).build()?;
///
/// let slot = slots.acquire()?;
/// // ... perform the activity ...
/// slots.release(slot)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct IdLifecycle {
    next_id: u64,
}

impl IdLifecycle {
    /// Creates a new [`IdLifecycle`] that will mint handles starting from 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandleLifecycle for IdLifecycle {
    type Handle = HandleId;

    fn create(&mut self) -> HandleId {
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("u64 handle id space cannot be exhausted by any realistic workload");

        HandleId(self.next_id)
    }

    fn activate(&mut self, _handle: &HandleId) {}

    fn deactivate(&mut self, _handle: &HandleId) {}

    fn destroy(&mut self, _handle: HandleId) {}
}

/// An opaque numeric handle minted by [`IdLifecycle`].
///
/// Ids are unique per lifecycle and never reused, even after destruction.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HandleId(u64);

impl HandleId {
    /// The numeric value of the handle.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_monotonic() {
        let mut lifecycle = IdLifecycle::new();

        let a = lifecycle.create();
        let b = lifecycle.create();

        assert_ne!(a, b);
        assert!(a.get() < b.get());
    }

    #[test]
    fn destroyed_ids_are_not_reused() {
        let mut lifecycle = IdLifecycle::new();

        let a = lifecycle.create();
        let value = a.get();
        lifecycle.destroy(a);

        let b = lifecycle.create();
        assert_ne!(b.get(), value);
    }
}
