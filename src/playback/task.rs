use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

use anyhow::anyhow;

use crate::foundation::error::{LedError, LedResult};

/// Cooperative cancellation flag shared between an owner and its background work.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Never blocks.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sleep for `total` in slices of at most `slice`, returning `false` as soon as
    /// a cancellation is observed between slices.
    pub fn sleep_unless_cancelled(&self, total: Duration, slice: Duration) -> bool {
        let deadline = Instant::now() + total;
        let slice = if slice.is_zero() { total } else { slice };
        loop {
            if self.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep(slice.min(deadline - now));
        }
    }
}

/// A background task with its own cancellation token, joinable by its owner.
#[derive(Debug)]
pub struct PlaybackHandle<T> {
    token: CancelToken,
    join: JoinHandle<LedResult<T>>,
}

impl<T: Send + 'static> PlaybackHandle<T> {
    /// Run `work` on a named thread, handing it a fresh token.
    pub fn spawn(
        name: impl Into<String>,
        work: impl FnOnce(CancelToken) -> LedResult<T> + Send + 'static,
    ) -> LedResult<Self> {
        Self::spawn_with_token(CancelToken::new(), name, work)
    }

    /// Like [`PlaybackHandle::spawn`], with a token the caller already shares elsewhere.
    pub fn spawn_with_token(
        token: CancelToken,
        name: impl Into<String>,
        work: impl FnOnce(CancelToken) -> LedResult<T> + Send + 'static,
    ) -> LedResult<Self> {
        let worker_token = token.clone();
        let join = std::thread::Builder::new()
            .name(name.into())
            .spawn(move || work(worker_token))
            .map_err(|e| LedError::Other(anyhow!("spawn playback thread: {e}")))?;
        Ok(Self { token, join })
    }

    /// Request cancellation without waiting for the task to observe it.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the task and return its result.
    pub fn join(self) -> LedResult<T> {
        self.join
            .join()
            .map_err(|_| LedError::Other(anyhow!("playback thread panicked")))?
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/task.rs"]
mod tests;
