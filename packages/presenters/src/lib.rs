//! This package provides [`PresenterSet`], an explicit registration list for wiring
//! presentation components to a target in a controlled order.
//!
//! A *presenter* is anything that needs to be attached to a freshly constructed target -
//! typically presentation state binding to a model or controller. Instead of discovering
//! presenters by scanning an object tree at runtime, callers register them explicitly at
//! composition time; [`PresenterSet::attach_all()`] then dispatches to every presenter in
//! ascending [priority][Presenter::priority] order.
//!
//! Registration order is preserved among presenters of equal priority, so the dispatch
//! order is fully deterministic.
//!
//! # Example
//!
//! ```rust
//! use presenters::PresenterSet;
//!
//! struct Board {
//!     name: &'static str,
//! }
//!
//! let mut presenters = PresenterSet::new();
//!
//! // Lower priority attaches first; the default priority is 0.
//! presenters.register_fn(10, |board: &Board| println!("animating {}", board.name));
//! presenters.register_fn(-10, |board: &Board| println!("laying out {}", board.name));
//!
//! let board = Board { name: "level 1" };
//! presenters.attach_all(&board);
//! ```

mod presenter;
mod set;

pub use presenter::Presenter;
pub use set::PresenterSet;
