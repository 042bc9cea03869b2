//! Helpers for profiling the serialization and partitioning paths.
//!
//! Scopes are only recorded once a profiler turns
//! `puffin::set_scopes_on(true)`; until then each scope costs a single atomic load.

pub mod reexports {
    #[cfg(not(target_arch = "wasm32"))]
    pub use puffin;
}

/// Wrapper around puffin profiler on native, no-op on wasm.
#[macro_export]
macro_rules! profile_function {
    ($($arg: tt)*) => {
        #[cfg(not(target_arch = "wasm32"))]
        $crate::reexports::puffin::profile_function!($($arg)*);
    };
}

/// Wrapper around puffin profiler on native, no-op on wasm.
#[macro_export]
macro_rules! profile_scope {
    ($($arg: tt)*) => {
        #[cfg(not(target_arch = "wasm32"))]
        $crate::reexports::puffin::profile_scope!($($arg)*);
    };
}

/// Turn scope recording on or off for the whole process.
pub fn set_profiling_enabled(enabled: bool) {
    #[cfg(not(target_arch = "wasm32"))]
    puffin::set_scopes_on(enabled);

    #[cfg(target_arch = "wasm32")]
    let _ = enabled;
}

/// Are scopes currently being recorded?
pub fn is_profiling_enabled() -> bool {
    #[cfg(not(target_arch = "wasm32"))]
    {
        puffin::are_scopes_on()
    }

    #[cfg(target_arch = "wasm32")]
    {
        false
    }
}
