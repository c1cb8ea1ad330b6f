use std::sync::{Arc, Mutex, PoisonError};

use crate::foundation::error::LedResult;

/// Sink contract for one physical panel.
///
/// `set_realtime_mode` is called before a stream of `push_frame` calls and must be
/// idempotent. Failures should be reported as [`crate::LedError::EndpointUnavailable`].
pub trait DeviceSink: Send {
    /// Put the device into streaming mode.
    fn set_realtime_mode(&mut self) -> LedResult<()>;
    /// Deliver one fully composed, serialized device-local frame.
    fn push_frame(&mut self, bytes: &[u8]) -> LedResult<()>;
}

impl<T: DeviceSink + ?Sized> DeviceSink for Box<T> {
    fn set_realtime_mode(&mut self) -> LedResult<()> {
        (**self).set_realtime_mode()
    }

    fn push_frame(&mut self, bytes: &[u8]) -> LedResult<()> {
        (**self).push_frame(bytes)
    }
}

#[derive(Debug, Default)]
struct Captured {
    realtime_calls: usize,
    frames: Vec<Vec<u8>>,
}

/// In-memory sink for tests and debugging.
///
/// Clones share one capture buffer, so a test can keep a handle while the
/// sink itself is moved into an array.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    captured: Arc<Mutex<Captured>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in delivery order.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.lock().frames.clone()
    }

    pub fn last_frame(&self) -> Option<Vec<u8>> {
        self.lock().frames.last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.lock().frames.len()
    }

    pub fn realtime_calls(&self) -> usize {
        self.lock().realtime_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Captured> {
        self.captured.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceSink for InMemorySink {
    fn set_realtime_mode(&mut self) -> LedResult<()> {
        self.lock().realtime_calls += 1;
        Ok(())
    }

    fn push_frame(&mut self, bytes: &[u8]) -> LedResult<()> {
        self.lock().frames.push(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/sink.rs"]
mod tests;
