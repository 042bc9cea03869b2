use std::fmt::Display;
use std::panic::Location;

/// For fallible lookups where an error should be reported, not returned.
pub trait ResultExt<T> {
    /// The value, or `None` after warning `"{context}: {error}"` with the caller's location.
    ///
    /// Each distinct warning is emitted once per process.
    fn warn_on_err_once(self, context: impl Display) -> Option<T>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn warn_on_err_once(self, context: impl Display) -> Option<T> {
        let caller = Location::caller();
        self.map_err(|err| crate::warn_once!("{context}: {err} ({caller})"))
            .ok()
    }
}
