/// A component that attaches itself to a target when the target is (re)initialized.
///
/// Implementations typically hold presentation state and wire it up to the target -
/// subscribing to its values, caching references, priming displays. The target is borrowed
/// for the duration of the call; presenters that need it afterwards should capture what
/// they need (for example, a clone of an observable handle).
///
/// # Priority
///
/// [`priority()`][Self::priority] controls dispatch order within a
/// [`PresenterSet`][crate::PresenterSet]: lower values attach first. The default is 0,
/// which suits presenters with no ordering requirements.
///
/// # Example
///
/// ```rust
/// use presenters::Presenter;
///
/// struct ScoreLabel {
///     last_painted: i64,
/// }
///
/// impl Presenter<i64> for ScoreLabel {
///     fn attach(&mut self, target: &i64) {
///         self.last_painted = *target;
///     }
/// }
/// ```
pub trait Presenter<T> {
    /// The dispatch priority of this presenter; lower values attach first.
    fn priority(&self) -> i32 {
        0
    }

    /// Attaches this presenter to the target.
    fn attach(&mut self, target: &T);
}
