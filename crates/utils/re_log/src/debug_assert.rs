/// Like [`std::debug_assert!`], but prefixes any failure message with "DEBUG ASSERT".
///
/// Expands to `if cfg!(…)` rather than `#[cfg(…)]` so the condition is still type-checked in
/// release builds.
#[macro_export]
macro_rules! debug_assert {
    ($cond:expr $(,)?) => {
        if cfg!(debug_assertions) && !$cond {
            ::core::panic!(
                "DEBUG ASSERT: assertion failed: {}",
                ::core::stringify!($cond),
            );
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(debug_assertions) && !$cond {
            ::core::panic!("DEBUG ASSERT: {}", ::core::format_args!($($arg)+));
        }
    };
}

/// Logs an error, and panics in debug builds with a "DEBUG PANIC: " prefix.
///
/// For states that are bugs, but that release builds must survive.
#[macro_export]
macro_rules! debug_panic {
    ($($arg:tt)+) => {
        if cfg!(debug_assertions) {
            ::core::panic!("DEBUG PANIC: {}", ::core::format_args!($($arg)+));
        } else {
            $crate::error!($($arg)+);
        }
    };
}
