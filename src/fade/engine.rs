use std::time::Duration;

use crate::{
    color::model::Color,
    device::array::Array,
    foundation::error::{LedError, LedResult},
    frame::grid::Frame,
    playback::task::CancelToken,
};

/// Default tick length of every fade and transition.
pub const DEFAULT_FRAME_TIME: Duration = Duration::from_millis(40);

/// A value that can be interpolated toward another value of the same kind.
pub trait Fadeable: Clone + Send + Sync {
    /// Reject `other` when the two values cannot be blended (layout, extent, parameter names).
    fn ensure_compatible(&self, other: &Self) -> LedResult<()>;

    /// Blend `self` toward `other` at `factor` with AVERAGE semantics.
    fn interpolate(&self, other: &Self, factor: f64) -> LedResult<Self>;
}

/// Somewhere a fadeable value of type `T` can be shown.
pub trait Endpoint<T> {
    fn write(&self, value: &T) -> LedResult<()>;
}

impl Fadeable for Color {
    fn ensure_compatible(&self, other: &Self) -> LedResult<()> {
        if self.layout() != other.layout() {
            return Err(LedError::invalid_argument(format!(
                "cannot fade {:?} color into {:?} color",
                self.layout(),
                other.layout()
            )));
        }
        Ok(())
    }

    fn interpolate(&self, other: &Self, factor: f64) -> LedResult<Self> {
        self.fade(other, factor)
    }
}

impl Fadeable for Frame {
    fn ensure_compatible(&self, other: &Self) -> LedResult<()> {
        Frame::ensure_compatible(self, other)
    }

    fn interpolate(&self, other: &Self, factor: f64) -> LedResult<Self> {
        self.fade(other, factor)
    }
}

impl Endpoint<Frame> for Array {
    fn write(&self, value: &Frame) -> LedResult<()> {
        self.show_realtime_frame(value)?.into_result()
    }
}

impl Endpoint<Color> for Array {
    fn write(&self, value: &Color) -> LedResult<()> {
        self.show_color(*value)?.into_result()
    }
}

/// Duration of a fade and the tick it is paced at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeTiming {
    pub duration: Duration,
    pub frame_time: Duration,
}

impl FadeTiming {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            frame_time: DEFAULT_FRAME_TIME,
        }
    }

    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }

    /// Factor increment per tick; `None` for an instantaneous fade.
    pub fn step(&self) -> LedResult<Option<f64>> {
        if self.duration.is_zero() {
            return Ok(None);
        }
        if self.frame_time.is_zero() {
            return Err(LedError::invalid_argument(
                "frame time must be > 0 for a timed fade",
            ));
        }
        Ok(Some(
            self.frame_time.as_secs_f64() / self.duration.as_secs_f64(),
        ))
    }
}

/// How a fade ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeOutcome {
    /// The target was written; `ticks` intermediate states preceded it.
    Completed { ticks: usize },
    /// Cancellation was observed at a tick boundary; the target was not written.
    Cancelled { ticks: usize },
}

impl FadeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Tick driver shared by value fades and frame transitions.
///
/// Calls `tick(factor)` for `factor = 0, step, 2*step, ...` while `factor <= 1`,
/// sleeping one frame time after each, then calls `finish` so the endpoint
/// ends exactly on the target. A zero duration skips straight to `finish`.
/// Cancellation is checked before every tick; an in-flight sleep completes first.
#[tracing::instrument(skip(tick, finish, cancel))]
pub fn drive(
    timing: &FadeTiming,
    cancel: Option<&CancelToken>,
    mut tick: impl FnMut(f64) -> LedResult<()>,
    finish: impl FnOnce() -> LedResult<()>,
) -> LedResult<FadeOutcome> {
    let Some(step) = timing.step()? else {
        finish()?;
        return Ok(FadeOutcome::Completed { ticks: 0 });
    };

    let mut factor = 0.0;
    let mut ticks = 0usize;
    while factor <= 1.0 {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            tracing::debug!(ticks, "fade cancelled");
            return Ok(FadeOutcome::Cancelled { ticks });
        }
        tick(factor)?;
        ticks += 1;
        std::thread::sleep(timing.frame_time);
        factor += step;
    }

    finish()?;
    Ok(FadeOutcome::Completed { ticks })
}

/// Fade an endpoint from `from` to `to`.
///
/// Compatibility is checked before the first tick, so a mismatched pair never
/// writes anything.
pub fn fade<T, E>(
    from: &T,
    to: &T,
    endpoint: &E,
    timing: &FadeTiming,
    cancel: Option<&CancelToken>,
) -> LedResult<FadeOutcome>
where
    T: Fadeable,
    E: Endpoint<T> + ?Sized,
{
    from.ensure_compatible(to)?;
    drive(
        timing,
        cancel,
        |factor| endpoint.write(&from.interpolate(to, factor)?),
        || endpoint.write(to),
    )
}

/// Tracks the value last shown on an endpoint so the next fade starts from it.
#[derive(Clone, Debug)]
pub struct Fader<T> {
    current: T,
}

impl<T: Fadeable> Fader<T> {
    pub fn new(initial: T) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Fade from the current value to `target`.
    ///
    /// After a cancelled fade the current value is the last intermediate state written.
    pub fn fade_to<E: Endpoint<T> + ?Sized>(
        &mut self,
        target: T,
        endpoint: &E,
        timing: &FadeTiming,
        cancel: Option<&CancelToken>,
    ) -> LedResult<FadeOutcome> {
        self.current.ensure_compatible(&target)?;
        let from = self.current.clone();
        let mut last = None;
        let outcome = drive(
            timing,
            cancel,
            |factor| {
                let value = from.interpolate(&target, factor)?;
                endpoint.write(&value)?;
                last = Some(value);
                Ok(())
            },
            || endpoint.write(&target),
        )?;

        match outcome {
            FadeOutcome::Completed { .. } => self.current = target,
            FadeOutcome::Cancelled { .. } => {
                if let Some(v) = last {
                    self.current = v;
                }
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fade/engine.rs"]
mod tests;
