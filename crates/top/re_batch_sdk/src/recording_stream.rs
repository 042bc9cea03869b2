use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use re_batch_core::{
    AsComponents, ComponentBatch, ComponentColumn, ResultExt as _, SerializationError,
};

use crate::sink::{BufferedSink, LogSink, MemorySink, MemorySinkStorage};
use crate::{EntityPath, LogMsg};

// ---

/// Why a [`RecordingStream`] call failed.
#[derive(thiserror::Error, Debug)]
pub enum RecordingStreamError {
    /// The data could not be turned into batches or columns.
    #[error("Could not serialize the logged data: {0}")]
    Serialization(#[from] SerializationError),

    /// The operation needs an enabled stream.
    #[error("The recording stream is disabled")]
    Disabled,
}

/// Result of a [`RecordingStream`] call.
pub type RecordingStreamResult<T> = Result<T, RecordingStreamError>;

// ---

/// Configures and creates a [`RecordingStream`].
///
/// ```
/// # use re_batch_sdk::RecordingStreamBuilder;
/// let (rec, storage) = RecordingStreamBuilder::new("my_app").enabled(true).memory();
/// # assert!(rec.is_enabled());
/// ```
#[derive(Debug)]
pub struct RecordingStreamBuilder {
    application_id: String,

    default_enabled: bool,
    enabled: Option<bool>,
}

impl RecordingStreamBuilder {
    /// Starts a builder for a stream recording on behalf of `application_id`, typically the
    /// name of the program.
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            default_enabled: true,
            enabled: None,
        }
    }

    /// Fallback used when neither [`Self::enabled`] nor the `RERUN` environment variable
    /// decide.
    #[inline]
    pub fn default_enabled(mut self, default_enabled: bool) -> Self {
        self.default_enabled = default_enabled;
        self
    }

    /// Forces the stream on or off, regardless of the `RERUN` environment variable.
    #[inline]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Creates a new [`RecordingStream`] that buffers everything in memory, until a proper sink
    /// is set with [`RecordingStream::set_sink`].
    pub fn buffered(self) -> RecordingStream {
        self.sink(Box::new(BufferedSink::new()))
    }

    /// Creates a new [`RecordingStream`] that is pre-configured to stream the data into a
    /// [`MemorySink`], and returns the storage of that sink.
    ///
    /// If the stream is disabled, the returned storage stays empty.
    pub fn memory(self) -> (RecordingStream, MemorySinkStorage) {
        let sink = MemorySink::new();
        let storage = sink.buffer();
        (self.sink(Box::new(sink)), storage)
    }

    /// Creates a new [`RecordingStream`] that sends everything to the given sink.
    pub fn sink(self, sink: Box<dyn LogSink>) -> RecordingStream {
        if self.is_enabled() {
            RecordingStream::new(self.application_id, sink)
        } else {
            re_log::debug!("Stream disabled, dropping the provided sink");
            RecordingStream::disabled()
        }
    }

    /// Whether or not logging is enabled, from the explicit setting, then the environment, then
    /// the default.
    pub fn is_enabled(&self) -> bool {
        self.enabled
            .unwrap_or_else(|| crate::decide_logging_enabled(self.default_enabled))
    }
}

// ---

/// A [`RecordingStream`] handles everything related to logging data into a [`LogSink`].
///
/// ## Threads
///
/// Clones share the same sink and can be sent to other threads.
///
/// Messages are handed to the sink under a lock: everything sent by a given thread reaches the
/// sink in the order it was sent, there is no global order across threads.
///
/// ## Shutdown
///
/// Dropping the last clone of a [`RecordingStream`] flushes its sink.
#[derive(Clone)]
pub struct RecordingStream {
    inner: Arc<Option<RecordingStreamInner>>,
}

struct RecordingStreamInner {
    application_id: String,
    sink: Mutex<Box<dyn LogSink>>,
}

impl fmt::Debug for RecordingStreamInner {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingStreamInner")
            .field("application_id", &self.application_id)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RecordingStream {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.as_ref() {
            Some(inner) => fmt::Debug::fmt(inner, f),
            None => f.write_str("RecordingStream { disabled }"),
        }
    }
}

impl Drop for RecordingStreamInner {
    fn drop(&mut self) {
        self.sink.get_mut().flush_blocking();
    }
}

impl RecordingStream {
    /// An enabled stream writing to `sink`. Usually built through [`RecordingStreamBuilder`].
    #[must_use = "the sink is flushed and closed once the last clone is dropped"]
    pub fn new(application_id: impl Into<String>, sink: Box<dyn LogSink>) -> Self {
        let application_id = application_id.into();
        re_log::debug!("Created recording stream for {application_id:?}");

        Self {
            inner: Arc::new(Some(RecordingStreamInner {
                application_id,
                sink: Mutex::new(sink),
            })),
        }
    }

    /// A stream that records nothing and owns no sink.
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(None),
        }
    }

    /// `false` for streams made by [`Self::disabled`], whose recording calls do nothing.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// The application id this stream was created with, if enabled.
    #[inline]
    pub fn application_id(&self) -> Option<&str> {
        self.inner.as_ref().as_ref().map(|inner| inner.application_id.as_str())
    }

    #[inline]
    fn with<R>(&self, f: impl FnOnce(&RecordingStreamInner) -> R) -> Option<R> {
        let inner = self.inner.as_ref().as_ref();
        if inner.is_none() {
            re_log::debug_once!("Stream disabled, ignoring logging calls");
        }
        inner.map(f)
    }
}

impl RecordingStream {
    /// Log an archetype, or any other bundle of components, to the given entity.
    ///
    /// The bundle is serialized as a whole before anything is sent: on error, nothing is.
    ///
    /// ```
    /// # use re_batch_sdk::{RecordingStreamBuilder, archetypes::Boxes2D};
    /// let (rec, storage) = RecordingStreamBuilder::new("my_app").enabled(true).memory();
    /// rec.log("world/boxes", &Boxes2D::from_half_sizes([(1.0, 1.0)]))?;
    /// assert_eq!(storage.num_msgs(), 1);
    /// # Ok::<(), re_batch_sdk::RecordingStreamError>(())
    /// ```
    pub fn log<AS: ?Sized + AsComponents>(
        &self,
        entity_path: impl Into<EntityPath>,
        as_components: &AS,
    ) -> RecordingStreamResult<()> {
        re_tracing::profile_function!();

        if !self.is_enabled() {
            return Ok(());
        }

        let batches = as_components.as_component_batches()?;
        self.log_batches(entity_path, batches)
    }

    /// Log already serialized batches to the given entity, in the given order.
    pub fn log_batches(
        &self,
        entity_path: impl Into<EntityPath>,
        batches: impl IntoIterator<Item = ComponentBatch>,
    ) -> RecordingStreamResult<()> {
        let batches: Vec<_> = batches.into_iter().collect();
        let num_instances = batches.iter().map(ComponentBatch::len).max().unwrap_or(0);

        self.record_msg(LogMsg::Batches {
            entity_path: entity_path.into(),
            num_instances,
            batches,
        });

        Ok(())
    }

    /// Log data spanning many rows at once.
    ///
    /// Unlike [`Self::log`], which is row-oriented, this sends columnar data: the i-th run of
    /// every column belongs to the i-th row.
    /// All columns must have the same number of runs.
    pub fn send_columns(
        &self,
        entity_path: impl Into<EntityPath>,
        columns: impl IntoIterator<Item = ComponentColumn>,
    ) -> RecordingStreamResult<()> {
        re_tracing::profile_function!();

        let columns: Vec<_> = columns.into_iter().collect();

        if let Some(first) = columns.first() {
            let num_rows = first.num_runs();
            for column in &columns {
                if column.num_runs() != num_rows {
                    return Err(SerializationError::PartitionLengthMismatch {
                        expected: num_rows,
                        actual: column.num_runs(),
                    })
                    .with_context(column.descriptor().full_name())
                    .map_err(Into::into);
                }
            }
        }

        self.record_msg(LogMsg::Columns {
            entity_path: entity_path.into(),
            columns,
        });

        Ok(())
    }

    /// Records a [`LogMsg`] into the sink, unless the stream is disabled.
    #[inline]
    pub fn record_msg(&self, msg: LogMsg) {
        self.with(|inner| inner.sink.lock().send(msg));
    }

    /// Replaces the sink.
    ///
    /// Whatever the previous sink had buffered is forwarded to the new one, after flushing the
    /// previous one.
    pub fn set_sink(&self, sink: Box<dyn LogSink>) {
        self.with(|inner| {
            let mut current = inner.sink.lock();
            current.flush_blocking();
            let backlog = current.drain_backlog();
            *current = sink;
            current.send_all(backlog);
        });
    }

    /// Swaps the underlying sink for a [`MemorySink`] and returns its storage.
    pub fn memory(&self) -> RecordingStreamResult<MemorySinkStorage> {
        if !self.is_enabled() {
            return Err(RecordingStreamError::Disabled);
        }

        let sink = MemorySink::new();
        let storage = sink.buffer();
        self.set_sink(Box::new(sink));
        Ok(storage)
    }

    /// Initiates a flush of the underlying sink and blocks until it completes.
    pub fn flush_blocking(&self) {
        self.with(|inner| inner.sink.lock().flush_blocking());
    }
}
