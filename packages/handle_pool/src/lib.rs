//! This package provides [`HandlePool`], a bounded pool of reusable handles to host-managed
//! resources, together with [`HandlePoolRegistry`], a keyed collection of such pools.
//!
//! A handle is an opaque reference to a resource owned by some host environment - a scene
//! object, a connection, a buffer. The pool never looks inside a handle; it drives the
//! resource's lifecycle exclusively through a [`HandleLifecycle`] implementation supplied by
//! the host. This keeps the pooling policy (reuse, capping, shrinking) separate from what the
//! resources actually are.
//!
//! # Features
//!
//! - **Stack-order reuse**: the most recently released handle is the first one reissued,
//!   keeping a "warm" subset of handles in circulation.
//! - **Bounded growth**: an optional hard cap on the total handle count; a saturated pool
//!   reports [`Error::Exhausted`] instead of growing, so bursty demand cannot run away.
//! - **Pre-warming**: a configurable number of handles is created up front, so early
//!   acquisitions never pay creation cost.
//! - **Shrinking**: [`HandlePool::shrink()`] destroys excess free handles, returning the pool
//!   to its baseline size after a burst.
//! - **Keyed registry**: [`HandlePoolRegistry`] manages one pool per category key and
//!   delegates acquire/release by key.
//! - **No hidden globals**: registries and pools are constructed explicitly and passed by
//!   reference; nothing in this package is process-wide.
//!
//! # Example
//!
//! ```rust
//! use handle_pool::{HandlePool, IdLifecycle};
//!
//! # fn main() -> handle_pool::Result<()> {
//! let mut pool = HandlePool::builder(IdLifecycle::new())
//!     .initial_size(2)
//!     .max_size(3)
//!     .build()?;
//!
//! // The first acquisitions reuse the pre-created handles.
//! let a = pool.acquire()?;
//! let b = pool.acquire()?;
//!
//! // The third acquisition grows the pool up to the cap.
//! let c = pool.acquire()?;
//!
//! // The pool is now saturated; a fourth acquisition is denied, not fatal.
//! assert!(pool.acquire().is_err());
//!
//! // Releasing a handle makes it available again - and it is the first one reissued.
//! pool.release(b)?;
//! assert_eq!(pool.acquire()?, b);
//! # Ok(())
//! # }
//! ```
//!
//! # Single-threaded design
//!
//! Every mutating operation takes `&mut self`, so access to one pool is serialized by the
//! borrow checker. The package contains no locks and no async machinery; it is intended to be
//! driven from a single control loop.

mod builder;
mod error;
mod id_lifecycle;
mod lifecycle;
mod pool;
mod registry;

pub use builder::HandlePoolBuilder;
pub use error::{Error, Result};
pub use id_lifecycle::{HandleId, IdLifecycle};
pub use lifecycle::HandleLifecycle;
pub use pool::HandlePool;
pub use registry::HandlePoolRegistry;
