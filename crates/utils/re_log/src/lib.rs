//! Text logging (nothing to do with batch logging) for use in the batch crates.
//!
//! * `trace`: spammy things
//! * `debug`: things that might be useful when debugging
//! * `info`: things that we want to show to users
//! * `warn`: problems that we can recover from
//! * `error`: problems that lead to loss of functionality or data
//!
//! The `warn_once` etc macros are for when you want to suppress repeated
//! logging of the exact same message.

mod debug_assert;
mod result_extensions;

#[cfg(feature = "setup")]
mod setup;

pub use log::{Level, LevelFilter, debug, error, info, log_enabled, trace, warn};

// The `re_log::info_once!(…)` etc are nice helpers, but the `log-once` crate is a bit lacking.
// In the future we should implement our own macros to de-duplicate based on the callsite,
// similar to how the log console in a browser will automatically suppress duplicates.
pub use log_once::{debug_once, error_once, info_once, log_once, trace_once, warn_once};

pub use result_extensions::ResultExt;

#[cfg(feature = "setup")]
pub use setup::{default_log_filter, setup_logging};

/// Re-exports of other crates.
pub mod external {
    pub use log;
}
