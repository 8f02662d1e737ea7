use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::ops::{Add, Sub};
use std::rc::Rc;

use scopeguard::guard;

use crate::WatchKey;

type Observer<T> = Box<dyn FnMut(&T)>;

/// A single-threaded value holder that notifies registered observers when the value
/// changes.
///
/// This type is a cloneable handle: clones share the same underlying value and observer
/// list, so the value can be updated from one place and watched from many without any
/// global state. It is neither [`Send`] nor [`Sync`].
///
/// # Change detection and re-entrancy
///
/// [`set()`][Self::set] compares the new value against the current one and does nothing
/// when they are equal; [`set_forced()`][Self::set_forced] skips the comparison. Both
/// report whether observers were notified.
///
/// A `set` issued from *within* a change notification - directly or through any chain of
/// observers - is ignored and reports `false`, which prevents notification cycles. The
/// documented rule for observers is: read freely, mutate later.
///
/// Observers registered or removed during a notification take effect for subsequent
/// notifications; the in-flight notification runs the observer list as it was when the
/// change happened.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use observed::ObservedValue;
///
/// let lives = ObservedValue::new(3_u32);
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let observer_log = Rc::clone(&log);
///
/// let key = lives.watch(move |value| observer_log.borrow_mut().push(*value));
///
/// assert!(lives.set(2));
/// assert!(lives.set(1));
/// assert!(!lives.set(1)); // no change, no notification
///
/// lives.unwatch(key);
/// assert!(lives.set(0)); // changes, but nobody is listening anymore
///
/// assert_eq!(*log.borrow(), vec![2, 1]);
/// ```
pub struct ObservedValue<T> {
    inner: Rc<RefCell<Inner<T>>>,

    /// Set while a change notification is in flight. Kept outside the `RefCell` so a
    /// re-entrant `set` can bail out without touching the (possibly borrowed) inner state.
    changing: Rc<Cell<bool>>,
}

struct Inner<T> {
    value: T,
    observers: Vec<(WatchKey, Observer<T>)>,

    /// Unwatch requests made while a notification was in flight; applied when it ends.
    pending_unwatch: Vec<WatchKey>,

    next_key: u64,
}

impl<T> Clone for ObservedValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            changing: Rc::clone(&self.changing),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservedValue<T> {
    #[cfg_attr(test, mutants::skip)] // Formatting output carries no behavior to verify.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The inner state is mutably borrowed while observers run; do not assume we can
        // read it here.
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("ObservedValue")
                .field("value", &inner.value)
                .field("observers", &inner.observers.len())
                .field("changing", &self.changing.get())
                .finish(),
            Err(_) => f
                .debug_struct("ObservedValue")
                .field("value", &format_args!("<changing>"))
                .finish(),
        }
    }
}

impl<T: Default> Default for ObservedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ObservedValue<T> {
    /// Creates a new observed value holding `value`, with no observers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                observers: Vec::new(),
                pending_unwatch: Vec::new(),
                next_key: 0,
            })),
            changing: Rc::new(Cell::new(false)),
        }
    }

    /// A copy of the current value.
    #[must_use]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.borrow().value.clone()
    }

    /// Calls `f` with a reference to the current value and returns its result.
    ///
    /// Useful for reading large values without cloning. `f` must not call back into this
    /// observed value; the value is borrowed for the duration of the call.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Registers an observer to be called with the new value after every change.
    ///
    /// Observers are called in registration order. An observer registered while a
    /// notification is in flight first runs on the *next* change.
    pub fn watch(&self, observer: impl FnMut(&T) + 'static) -> WatchKey {
        let mut inner = self.inner.borrow_mut();

        let key = WatchKey::new(inner.next_key);
        inner.next_key = inner
            .next_key
            .checked_add(1)
            .expect("watch key space cannot be exhausted by any realistic workload");

        inner.observers.push((key, Box::new(observer)));
        key
    }

    /// Registers an observer and immediately invokes it with the current value.
    ///
    /// This is the usual way to wire up presentation state: the observer paints the
    /// current value right away and repaints on every change.
    pub fn bind(&self, mut observer: impl FnMut(&T) + 'static) -> WatchKey
    where
        T: Clone,
    {
        let current = self.get();
        observer(&current);
        self.watch(observer)
    }

    /// Removes a previously registered observer.
    ///
    /// Unknown or already removed keys are ignored. A removal requested while a
    /// notification is in flight takes effect when it ends.
    pub fn unwatch(&self, key: WatchKey) {
        let mut inner = self.inner.borrow_mut();

        if self.changing.get() {
            inner.pending_unwatch.push(key);
        } else {
            inner.observers.retain(|(existing, _)| *existing != key);
        }
    }

    /// Stores `value` and notifies observers, unless it equals the current value.
    ///
    /// Returns whether the value changed (and observers were notified). Always returns
    /// `false` when called from within a change notification; see the type-level
    /// documentation for the re-entrancy rule.
    pub fn set(&self, value: T) -> bool
    where
        T: Clone + PartialEq,
    {
        self.set_impl(value, false)
    }

    /// Stores `value` and notifies observers even if it equals the current value.
    ///
    /// Returns `false` only when called from within a change notification.
    pub fn set_forced(&self, value: T) -> bool
    where
        T: Clone + PartialEq,
    {
        self.set_impl(value, true)
    }

    fn set_impl(&self, value: T, forced: bool) -> bool
    where
        T: Clone + PartialEq,
    {
        if self.changing.get() {
            // Re-entrant set from within a notification: report "no change".
            return false;
        }

        {
            let inner = self.inner.borrow();
            if !forced && inner.value == value {
                return false;
            }
        }

        self.changing.set(true);

        // Swap the new value in and take the observer list out, so observers can read
        // this same value (or register new observers on it) without borrow conflicts.
        let observers = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            mem::take(&mut inner.observers)
        };

        // The guard restores the observer list and resets the changing flag even when an
        // observer panics, so the value stays usable afterwards.
        let mut observers = guard(observers, |observers| {
            let mut inner = self.inner.borrow_mut();

            // Observers registered during the notification landed in `inner.observers`;
            // they belong after the pre-existing ones.
            let added = mem::replace(&mut inner.observers, observers);
            inner.observers.extend(added);

            let pending = mem::take(&mut inner.pending_unwatch);
            if !pending.is_empty() {
                inner
                    .observers
                    .retain(|(key, _)| !pending.contains(key));
            }

            self.changing.set(false);
        });

        for (_, observer) in &mut *observers {
            observer(&value);
        }

        drop(observers);
        true
    }

    /// Computes a new value from the current one and stores it via [`set()`][Self::set].
    ///
    /// Returns whether the value changed. `f` receives a copy of the current value, so it
    /// may freely call back into this observed value.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool
    where
        T: Clone + PartialEq,
    {
        let current = self.get();
        self.set(f(&current))
    }

    /// Adds `delta` to the current value.
    ///
    /// Returns whether the value changed.
    pub fn add(&self, delta: T) -> bool
    where
        T: Clone + PartialEq + Add<Output = T>,
    {
        let next = self.get() + delta;
        self.set(next)
    }

    /// Subtracts `delta` from the current value.
    ///
    /// Returns whether the value changed.
    pub fn subtract(&self, delta: T) -> bool
    where
        T: Clone + PartialEq + Sub<Output = T>,
    {
        let next = self.get() - delta;
        self.set(next)
    }

    /// Clamps the current value into `[min, max]`.
    ///
    /// Returns whether the value changed (it does not when already within bounds).
    pub fn clamp_to(&self, min: T, max: T) -> bool
    where
        T: Clone + PartialEq + PartialOrd,
    {
        let mut next = self.get();

        if next < min {
            next = min;
        } else if next > max {
            next = max;
        }

        self.set(next)
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::arithmetic_side_effects,
        reason = "we do not need to worry about these things when writing test code"
    )]

    use std::panic::{AssertUnwindSafe, catch_unwind};

    use static_assertions::assert_not_impl_any;

    use super::*;

    assert_not_impl_any!(ObservedValue<i32>: Send, Sync);

    fn logging_value() -> (ObservedValue<i32>, Rc<RefCell<Vec<i32>>>) {
        let value = ObservedValue::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let observer_log = Rc::clone(&log);
        value.watch(move |v| observer_log.borrow_mut().push(*v));

        (value, log)
    }

    #[test]
    fn set_stores_and_notifies() {
        let (value, log) = logging_value();

        assert!(value.set(7));
        assert_eq!(value.get(), 7);
        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn set_equal_value_is_silent() {
        let (value, log) = logging_value();

        assert!(value.set(7));
        assert!(!value.set(7));

        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn set_forced_notifies_without_change() {
        let (value, log) = logging_value();

        assert!(value.set_forced(0));
        assert_eq!(*log.borrow(), vec![0]);
    }

    #[test]
    fn observers_run_in_registration_order() {
        let value = ObservedValue::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let observer_log = Rc::clone(&log);
            value.watch(move |_: &i32| observer_log.borrow_mut().push(tag));
        }

        assert!(value.set(1));
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn reentrant_set_is_ignored() {
        let value = ObservedValue::new(0);

        let handle = value.clone();
        value.watch(move |_| {
            // Any attempt to mutate from within a notification is a silent no-op.
            assert!(!handle.set(99));
        });

        assert!(value.set(1));
        assert_eq!(value.get(), 1);
    }

    #[test]
    fn reads_from_within_notification_are_allowed() {
        let value = ObservedValue::new(0);

        let handle = value.clone();
        value.watch(move |v| {
            assert_eq!(handle.get(), *v);
            handle.with(|current| assert_eq!(current, v));
        });

        assert!(value.set(42));
    }

    #[test]
    fn observer_registered_during_notification_starts_next_change() {
        let value = ObservedValue::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let handle = value.clone();
        let outer_log = Rc::clone(&log);
        value.watch(move |v| {
            outer_log.borrow_mut().push(("outer", *v));

            let inner_log = Rc::clone(&outer_log);
            handle.watch(move |v| inner_log.borrow_mut().push(("inner", *v)));
        });

        assert!(value.set(1));
        assert_eq!(*log.borrow(), vec![("outer", 1)]);

        assert!(value.set(2));
        assert_eq!(
            *log.borrow(),
            vec![("outer", 1), ("outer", 2), ("inner", 2)]
        );
    }

    #[test]
    fn unwatch_stops_notifications() {
        let (value, log) = logging_value();

        let extra_log = Rc::new(RefCell::new(Vec::new()));
        let observer_log = Rc::clone(&extra_log);
        let key = value.watch(move |v| observer_log.borrow_mut().push(*v));

        assert!(value.set(1));
        value.unwatch(key);
        assert!(value.set(2));

        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(*extra_log.borrow(), vec![1]);
    }

    #[test]
    fn repeated_unwatch_is_ignored() {
        let (value, log) = logging_value();

        let key = value.watch(|_: &i32| {});

        value.unwatch(key);
        value.unwatch(key);

        assert!(value.set(1));
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn unwatch_during_notification_takes_effect_afterwards() {
        let value = ObservedValue::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let victim_log = Rc::clone(&log);
        let victim = value.watch(move |v| victim_log.borrow_mut().push(*v));

        // Registered after the victim, so the victim still runs for the change during
        // which it is removed.
        let handle = value.clone();
        value.watch(move |_| handle.unwatch(victim));

        assert!(value.set(1));
        assert!(value.set(2));

        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn bind_invokes_immediately_and_on_changes() {
        let value = ObservedValue::new(5);
        let log = Rc::new(RefCell::new(Vec::new()));

        let observer_log = Rc::clone(&log);
        value.bind(move |v| observer_log.borrow_mut().push(*v));

        assert_eq!(*log.borrow(), vec![5]);

        assert!(value.set(6));
        assert_eq!(*log.borrow(), vec![5, 6]);
    }

    #[test]
    fn clones_share_state() {
        let value = ObservedValue::new(0);
        let clone = value.clone();

        assert!(clone.set(9));
        assert_eq!(value.get(), 9);
    }

    #[test]
    fn update_helpers() {
        let value = ObservedValue::new(10_i64);

        assert!(value.add(5));
        assert_eq!(value.get(), 15);

        assert!(value.subtract(3));
        assert_eq!(value.get(), 12);

        assert!(!value.add(0));

        assert!(value.update(|v| v * 2));
        assert_eq!(value.get(), 24);

        assert!(value.clamp_to(0, 20));
        assert_eq!(value.get(), 20);

        assert!(!value.clamp_to(0, 20));

        assert!(value.clamp_to(25, 30));
        assert_eq!(value.get(), 25);
    }

    #[test]
    fn works_with_non_numeric_values() {
        let value = ObservedValue::new("idle".to_string());
        let log = Rc::new(RefCell::new(Vec::new()));

        let observer_log = Rc::clone(&log);
        value.watch(move |v: &String| observer_log.borrow_mut().push(v.clone()));

        assert!(value.set("running".to_string()));
        assert!(!value.set("running".to_string()));

        assert_eq!(*log.borrow(), vec!["running".to_string()]);
    }

    #[test]
    fn panicking_observer_does_not_wedge_the_value() {
        let value = ObservedValue::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        value.watch(|v| {
            if *v == 1 {
                panic!("observer rejects the value");
            }
        });

        let observer_log = Rc::clone(&log);
        value.watch(move |v| observer_log.borrow_mut().push(*v));

        let result = catch_unwind(AssertUnwindSafe(|| value.set(1)));
        assert!(result.is_err());

        // The value is not stuck in the "changing" state and both observers survived.
        assert!(value.set(2));
        assert_eq!(*log.borrow(), vec![2]);
    }
}
