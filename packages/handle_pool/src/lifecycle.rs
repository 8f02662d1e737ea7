use std::hash::Hash;

/// The host-supplied capability set for one category of pooled resources.
///
/// A [`HandlePool`][crate::HandlePool] owns exactly one lifecycle and drives every resource
/// it manages through it. The pool itself never inspects a handle; creation, state toggling
/// and destruction are entirely the lifecycle's business. This is the seam between the
/// host-independent pooling policy and whatever the host environment actually manages
/// (scene objects, connections, buffers).
///
/// # Contract
///
/// - [`create()`][Self::create] returns a handle to a brand new resource in its default
///   state. Handles must be distinguishable from each other for as long as the resource
///   exists, which is why [`Handle`][Self::Handle] requires `Eq + Hash`.
/// - [`activate()`][Self::activate] and [`deactivate()`][Self::deactivate] toggle the
///   resource's usable state without destroying it. The pool deactivates every handle that
///   enters its free set and activates every handle it issues.
/// - [`destroy()`][Self::destroy] permanently releases the host resources behind the handle.
///   The pool never touches a handle again after destroying it.
///
/// # Example
///
/// ```rust
/// use handle_pool::HandleLifecycle;
///
/// /// Pools indices into an externally owned particle array.
/// struct Particles {
///     next: usize,
///     visible: Vec<bool>,
/// }
///
/// impl HandleLifecycle for Particles {
///     type Handle = usize;
///
///     fn create(&mut self) -> usize {
///         let index = self.next;
///         self.next += 1;
///         self.visible.push(false);
///         index
///     }
///
///     fn activate(&mut self, handle: &usize) {
///         self.visible[*handle] = true;
///     }
///
///     fn deactivate(&mut self, handle: &usize) {
///         self.visible[*handle] = false;
///     }
///
///     fn destroy(&mut self, _handle: usize) {
///         // The slot stays allocated in this simple host; a real one would free it.
///     }
/// }
/// ```
pub trait HandleLifecycle {
    /// An opaque reference to one host-managed resource instance.
    ///
    /// `Clone` because the pool tracks issued handles while the caller holds them;
    /// `Eq + Hash` so the pool can verify releases against its issued set.
    type Handle: Clone + Eq + Hash;

    /// Constructs one new resource instance in its default state and returns its handle.
    fn create(&mut self) -> Self::Handle;

    /// Makes the resource behind the handle usable, without changing its identity.
    fn activate(&mut self, handle: &Self::Handle);

    /// Makes the resource behind the handle dormant, without destroying it.
    fn deactivate(&mut self, handle: &Self::Handle);

    /// Permanently releases the host resources behind the handle.
    fn destroy(&mut self, handle: Self::Handle);
}
