/// Identifies one registered observer of an [`ObservedValue`][crate::ObservedValue].
///
/// Returned by [`watch()`][crate::ObservedValue::watch] and
/// [`bind()`][crate::ObservedValue::bind]; pass it to
/// [`unwatch()`][crate::ObservedValue::unwatch] to stop receiving notifications.
///
/// Keys are unique per observed value and never reused, so a stale key held after
/// `unwatch` is harmless.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WatchKey {
    id: u64,
}

impl WatchKey {
    pub(crate) fn new(id: u64) -> Self {
        Self { id }
    }
}
