//! Log component batches and archetypes.
//!
//! A [`RecordingStream`] serializes whatever it is given to log (any [`AsComponents`], e.g. an
//! archetype from [`archetypes`]) and hands the resulting [`LogMsg`]s to a [`sink::LogSink`].
//!
//! ```
//! use re_batch_sdk::{RecordingStreamBuilder, archetypes::Scalars};
//!
//! let (rec, storage) = RecordingStreamBuilder::new("my_app").enabled(true).memory();
//!
//! let scalars = Scalars::new((0..10).map(|i| i as f64));
//! rec.send_columns("plot", scalars.columns_of_unit_batches()?)?;
//!
//! assert_eq!(storage.take()[0].num_rows(), 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
//!

#![warn(missing_docs)]

mod log_msg;
mod log_sink;
mod recording_stream;

use re_log::ResultExt as _;

pub use self::{
    log_msg::{EntityPath, LogMsg},
    recording_stream::{
        RecordingStream, RecordingStreamBuilder, RecordingStreamError, RecordingStreamResult,
    },
};

pub use re_batch_core::{
    Archetype, AsComponents, Collection, Component, ComponentBatch, ComponentColumn,
    ComponentDescriptor, Loggable, SerializationError, SerializationResult,
};
pub use re_batch_types::{archetypes, components, datatypes};

/// Where [`LogMsg`]s end up.
pub mod sink {
    pub use crate::log_sink::{BufferedSink, LogSink, MemorySink, MemorySinkStorage};
}

/// The crates this one is built on.
pub mod external {
    pub use re_batch_core;
    pub use re_batch_types;
    pub use re_log;

    pub use re_batch_core::external::*;
}

// ---

/// Environment variable that switches logging on or off, overriding the builder's default.
pub const RERUN_ENV_VAR: &str = "RERUN";

fn parse_rerun_env(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "on" | "true" => Ok(true),
        "0" | "off" | "false" => Ok(false),
        _ => Err(format!("expected one of on/off/1/0/true/false, got {value:?}")),
    }
}

/// Whether a stream should record: `RERUN` wins if set to a valid value, otherwise
/// `default_enabled`.
pub fn decide_logging_enabled(default_enabled: bool) -> bool {
    let from_env = std::env::var(RERUN_ENV_VAR)
        .ok()
        .and_then(|value| {
            parse_rerun_env(&value).warn_on_err_once(format_args!("Ignoring {RERUN_ENV_VAR}"))
        });

    match from_env {
        Some(enabled) => {
            let state = if enabled { "on" } else { "off" };
            re_log::info_once!("Recording switched {state} by {RERUN_ENV_VAR}");
            enabled
        }
        None => {
            if !default_enabled {
                re_log::info_once!("Recording is off by default; set {RERUN_ENV_VAR}=1 to record");
            }
            default_enabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rerun_env_values() {
        for on in ["1", "true", "ON", " True "] {
            assert_eq!(parse_rerun_env(on), Ok(true), "{on}");
        }
        for off in ["0", "false", "OFF"] {
            assert_eq!(parse_rerun_env(off), Ok(false), "{off}");
        }
        assert!(parse_rerun_env("maybe").unwrap_err().contains("\"maybe\""));
        assert_eq!(parse_rerun_env("maybe").warn_on_err_once(RERUN_ENV_VAR), None);
    }
}
