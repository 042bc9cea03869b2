use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::LogMsg;

/// Destination of everything a [`crate::RecordingStream`] records.
pub trait LogSink: Send + Sync + 'static {
    /// Hands one message over to the sink.
    fn send(&self, msg: LogMsg);

    /// Hands many messages over, in order.
    #[inline]
    fn send_all(&self, messages: Vec<LogMsg>) {
        for msg in messages {
            self.send(msg);
        }
    }

    /// Removes and returns whatever the sink is holding on to for a later sink.
    ///
    /// Sinks that deliver immediately have no backlog.
    #[inline]
    fn drain_backlog(&self) -> Vec<LogMsg> {
        vec![]
    }

    /// Returns once every message handed to this sink has been delivered.
    fn flush_blocking(&self);
}

// ---

/// Holds on to messages until [`LogSink::drain_backlog`] hands them to the next sink.
///
/// This is the sink a stream starts with when it has nowhere else to go yet: swapping in another
/// sink forwards the backlog to it.
#[derive(Default)]
pub struct BufferedSink(Mutex<Vec<LogMsg>>);

impl BufferedSink {
    /// An empty buffer.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for BufferedSink {
    #[inline]
    fn send(&self, msg: LogMsg) {
        self.0.lock().push(msg);
    }

    #[inline]
    fn send_all(&self, mut messages: Vec<LogMsg>) {
        self.0.lock().append(&mut messages);
    }

    #[inline]
    fn drain_backlog(&self) -> Vec<LogMsg> {
        std::mem::take(&mut self.0.lock())
    }

    #[inline]
    fn flush_blocking(&self) {}
}

/// Keeps messages in memory for good: unlike [`BufferedSink`] there is no backlog to drain.
///
/// Read them back through [`MemorySink::buffer`].
#[derive(Default)]
pub struct MemorySink(MemorySinkStorage);

impl MemorySink {
    /// An empty sink.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle to the stored messages.
    #[inline]
    pub fn buffer(&self) -> MemorySinkStorage {
        self.0.clone()
    }
}

impl LogSink for MemorySink {
    #[inline]
    fn send(&self, msg: LogMsg) {
        self.0.write().push(msg);
    }

    #[inline]
    fn send_all(&self, mut messages: Vec<LogMsg>) {
        self.0.write().append(&mut messages);
    }

    #[inline]
    fn flush_blocking(&self) {}
}

/// Shared handle to the messages of a [`MemorySink`]; clones see the same messages.
#[derive(Default, Clone)]
pub struct MemorySinkStorage(Arc<RwLock<Vec<LogMsg>>>);

impl MemorySinkStorage {
    #[inline]
    fn write(&self) -> parking_lot::RwLockWriteGuard<'_, Vec<LogMsg>> {
        self.0.write()
    }

    /// Locks the messages for reading.
    #[inline]
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, Vec<LogMsg>> {
        self.0.read()
    }

    /// Removes and returns every stored message.
    #[inline]
    pub fn take(&self) -> Vec<LogMsg> {
        std::mem::take(&mut *self.0.write())
    }

    /// Number of messages currently stored.
    #[inline]
    pub fn num_msgs(&self) -> usize {
        self.0.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(path: &str) -> LogMsg {
        LogMsg::Batches {
            entity_path: path.into(),
            num_instances: 0,
            batches: vec![],
        }
    }

    #[test]
    fn buffered_sink_drains() {
        let sink = BufferedSink::new();
        sink.send(msg("a"));
        sink.send_all(vec![msg("b"), msg("c")]);

        let backlog = sink.drain_backlog();
        assert_eq!(backlog.len(), 3);
        assert_eq!(backlog[2].entity_path(), &crate::EntityPath::from("c"));
        assert!(sink.drain_backlog().is_empty());
    }

    #[test]
    fn memory_sink_keeps_messages() {
        let sink = MemorySink::new();
        let storage = sink.buffer();

        sink.send_all(vec![msg("a"), msg("b")]);
        assert!(sink.drain_backlog().is_empty());
        assert_eq!(storage.num_msgs(), 2);

        assert_eq!(storage.take().len(), 2);
        assert_eq!(storage.num_msgs(), 0);
    }
}
