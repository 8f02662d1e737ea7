//! This package provides [`ObservedValue`], a single-threaded value holder that notifies
//! registered observers when the value changes.
//!
//! An observed value is a cloneable handle: clones share the same underlying value, so one
//! part of the application can update it while others watch it, with no global state and no
//! channels. It is the "model" half of a model/presenter split - presentation code watches
//! the value, game logic sets it.
//!
//! # Features
//!
//! - **Change detection**: [`set()`][ObservedValue::set] only stores and notifies when the
//!   new value differs from the current one; [`set_forced()`][ObservedValue::set_forced]
//!   notifies unconditionally.
//! - **Re-entrancy protection**: a `set` issued from within a change notification is ignored
//!   and reports "no change", so observer chains cannot create notification cycles.
//! - **Observer management**: [`watch()`][ObservedValue::watch] registers an observer and
//!   returns a [`WatchKey`] for later [`unwatch()`][ObservedValue::unwatch];
//!   [`bind()`][ObservedValue::bind] additionally invokes the observer immediately with the
//!   current value. Registrations and removals made *during* a notification take effect for
//!   subsequent notifications.
//! - **Update helpers**: [`update()`][ObservedValue::update],
//!   [`add()`][ObservedValue::add], [`subtract()`][ObservedValue::subtract] and
//!   [`clamp_to()`][ObservedValue::clamp_to] for the common read-modify-write patterns.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use observed::ObservedValue;
//!
//! let score = ObservedValue::new(0_i64);
//!
//! let seen = Rc::new(Cell::new(0_i64));
//! let seen_by_observer = Rc::clone(&seen);
//!
//! score.watch(move |value| seen_by_observer.set(*value));
//!
//! assert!(score.set(10));
//! assert_eq!(seen.get(), 10);
//!
//! // Setting the same value again changes nothing and notifies nobody.
//! assert!(!score.set(10));
//!
//! assert!(score.add(5));
//! assert_eq!(seen.get(), 15);
//! ```
//!
//! # Single-threaded design
//!
//! [`ObservedValue`] is built on `Rc` and is neither [`Send`] nor [`Sync`]; it is intended
//! to be driven from a single control loop.

mod value;
mod watch_key;

pub use value::ObservedValue;
pub use watch_key::WatchKey;
