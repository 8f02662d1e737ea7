use std::fmt;

use crate::Presenter;

/// An explicit, priority-ordered registration list of [`Presenter`]s for one target type.
///
/// Presenters are registered at composition time and dispatched with
/// [`attach_all()`][Self::attach_all], which sorts the list by
/// [priority][Presenter::priority] (lower first, registration order preserved among equal
/// priorities) and invokes every presenter in order. The sort happens at most once per
/// change to the list, not on every dispatch.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use presenters::PresenterSet;
///
/// let order = Rc::new(RefCell::new(Vec::new()));
/// let mut presenters = PresenterSet::new();
///
/// let log = Rc::clone(&order);
/// presenters.register_fn(1, move |_: &()| log.borrow_mut().push("late"));
///
/// let log = Rc::clone(&order);
/// presenters.register_fn(-1, move |_: &()| log.borrow_mut().push("early"));
///
/// presenters.attach_all(&());
/// assert_eq!(*order.borrow(), vec!["early", "late"]);
/// ```
#[must_use]
pub struct PresenterSet<T> {
    entries: Vec<Entry<T>>,

    /// Whether `entries` is currently sorted by priority. Cleared on registration so
    /// `attach_all` knows when a re-sort is due.
    sorted: bool,
}

struct Entry<T> {
    priority: i32,
    presenter: Box<dyn Presenter<T>>,
}

impl<T> fmt::Debug for PresenterSet<T> {
    #[cfg_attr(test, mutants::skip)] // Formatting output carries no behavior to verify.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterSet")
            .field(
                "priorities",
                &self.entries.iter().map(|e| e.priority).collect::<Vec<_>>(),
            )
            .field("sorted", &self.sorted)
            .finish()
    }
}

impl<T> Default for PresenterSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PresenterSet<T> {
    /// Creates an empty presenter set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            sorted: true,
        }
    }

    /// Registers a presenter; its [priority][Presenter::priority] is read once, at
    /// registration time.
    pub fn register(&mut self, presenter: impl Presenter<T> + 'static) {
        self.entries.push(Entry {
            priority: presenter.priority(),
            presenter: Box::new(presenter),
        });
        self.sorted = false;
    }

    /// Registers a closure as a presenter with the given priority.
    pub fn register_fn(&mut self, priority: i32, attach: impl FnMut(&T) + 'static) {
        self.register(FnPresenter { priority, attach });
    }

    /// Attaches every registered presenter to `target`, in ascending priority order.
    ///
    /// Presenters with equal priority attach in registration order.
    pub fn attach_all(&mut self, target: &T) {
        if !self.sorted {
            // Stable sort: equal priorities keep their registration order.
            self.entries.sort_by_key(|entry| entry.priority);
            self.sorted = true;
        }

        for entry in &mut self.entries {
            entry.presenter.attach(target);
        }
    }

    /// The number of registered presenters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no presenters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all registered presenters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.sorted = true;
    }
}

/// Adapter that lets a closure act as a [`Presenter`].
struct FnPresenter<F> {
    priority: i32,
    attach: F,
}

impl<T, F: FnMut(&T)> Presenter<T> for FnPresenter<F> {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn attach(&mut self, target: &T) {
        (self.attach)(target);
    }
}
