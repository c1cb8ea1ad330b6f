use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use rand::{Rng, seq::SliceRandom};

use crate::{
    animation::ease::Ease,
    color::blend::BlendMode,
    config::model::PlaybackDefaults,
    device::array::Array,
    effects::transitions::{Transition, TransitionDirection, TransitionType},
    fade::engine::{DEFAULT_FRAME_TIME, Endpoint, FadeOutcome, FadeTiming, drive},
    foundation::error::{LedError, LedResult},
    frame::grid::Frame,
    frame::sequence::{Content, Sequence},
    playback::task::{CancelToken, PlaybackHandle},
};

/// How many passes over the content to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    Finite(u32),
    /// Until stopped.
    Forever,
}

impl LoopCount {
    fn allows(self, pass: u32) -> bool {
        match self {
            Self::Finite(n) => pass < n,
            Self::Forever => true,
        }
    }
}

impl From<i32> for LoopCount {
    /// Negative counts mean "until stopped".
    fn from(n: i32) -> Self {
        u32::try_from(n).map_or(Self::Forever, Self::Finite)
    }
}

/// What to do when showing one item fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop playback and return the error.
    #[default]
    Abort,
    /// Log, skip to the next item, and give up only when a whole pass fails.
    SkipFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Idle,
    Running,
    Stopped,
    Exhausted,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayOptions {
    pub loops: LoopCount,
    /// Reshuffle the items on every pass.
    pub random: bool,
    pub transition: TransitionType,
    /// `None` draws a supported direction per transition.
    pub direction: Option<TransitionDirection>,
    /// `None` draws a blend mode per transition.
    pub blend: Option<BlendMode>,
    pub transition_duration: Duration,
    pub frame_time: Duration,
    pub ease: Ease,
    pub on_error: ErrorPolicy,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self::from_defaults(&PlaybackDefaults::default())
    }
}

impl PlayOptions {
    pub fn from_defaults(defaults: &PlaybackDefaults) -> Self {
        Self {
            loops: LoopCount::Finite(1),
            random: false,
            transition: TransitionType::Fade,
            direction: None,
            blend: None,
            transition_duration: defaults.transition_duration(),
            frame_time: defaults.frame_time(),
            ease: Ease::Linear,
            on_error: ErrorPolicy::Abort,
        }
    }
}

/// Counters from one playback run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayReport {
    /// Completed passes over the content.
    pub passes: u32,
    pub items_shown: usize,
    /// Transitions that ran to completion.
    pub transitions: usize,
    /// Items dropped under [`ErrorPolicy::SkipFrame`].
    pub skipped: usize,
}

enum Shown<'a> {
    Completed(&'a Frame),
    Cancelled,
}

/// Token and state cell of one `play`/`play_async` call.
///
/// Each run owns its state cell, so a superseded run can only finish its own
/// record and never overwrites the state of the run that replaced it.
#[derive(Clone)]
struct Run {
    token: CancelToken,
    state: Arc<Mutex<PlayState>>,
}

impl Run {
    fn state(&self) -> PlayState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Looped, cancellable playback of a sequence onto an [`Array`].
///
/// Each `play`/`play_async` call starts a fresh run with its own cancellation
/// token and cancels the run it replaces; a stopped run cannot be resumed.
pub struct Player {
    content: Arc<Sequence>,
    options: PlayOptions,
    current: Mutex<Option<Run>>,
}

impl Player {
    pub fn new(content: Sequence, options: PlayOptions) -> Self {
        Self {
            content: Arc::new(content),
            options,
            current: Mutex::new(None),
        }
    }

    pub fn options(&self) -> &PlayOptions {
        &self.options
    }

    /// State of the most recent run; `Idle` before the first one.
    pub fn state(&self) -> PlayState {
        self.current_run().map_or(PlayState::Idle, |run| run.state())
    }

    /// False from the moment `stop` is requested.
    pub fn is_running(&self) -> bool {
        self.current_run()
            .is_some_and(|run| run.state() == PlayState::Running && !run.token.is_cancelled())
    }

    /// Request cancellation of the current run; does not wait for it.
    pub fn stop(&self) {
        if let Some(run) = self.current_run() {
            run.token.cancel();
        }
    }

    /// Play on the calling thread until the loop count is exhausted or `stop` is called.
    pub fn play(&self, array: &Array) -> LedResult<PlayReport> {
        let run = self.begin();
        run_to_end(&self.content, &self.options, array, &run.token, &run.state)
    }

    /// Play on a background thread; the handle can stop and join it.
    pub fn play_async(&self, array: Arc<Array>) -> LedResult<PlaybackHandle<PlayReport>> {
        let run = self.begin();
        let content = Arc::clone(&self.content);
        let options = self.options;
        let state = Arc::clone(&run.state);
        PlaybackHandle::spawn_with_token(run.token.clone(), "ledwall-playback", move |token| {
            run_to_end(&content, &options, &array, &token, &state)
        })
        .inspect_err(|e| {
            tracing::warn!(error = %e, "playback thread did not start");
            set_state(&run.state, PlayState::Failed);
        })
    }

    fn begin(&self) -> Run {
        let run = Run {
            token: CancelToken::new(),
            state: Arc::new(Mutex::new(PlayState::Running)),
        };
        let mut slot = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(run.clone()) {
            previous.token.cancel();
        }
        run
    }

    fn current_run(&self) -> Option<Run> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn set_state(state: &Mutex<PlayState>, next: PlayState) {
    *state.lock().unwrap_or_else(PoisonError::into_inner) = next;
}

#[tracing::instrument(skip_all, fields(items = content.len(), loops = ?options.loops))]
fn run_to_end(
    content: &Sequence,
    options: &PlayOptions,
    array: &Array,
    token: &CancelToken,
    state: &Mutex<PlayState>,
) -> LedResult<PlayReport> {
    let result = run_passes(content, options, array, token);
    let next = match &result {
        Ok(_) if token.is_cancelled() => PlayState::Stopped,
        Ok(_) => PlayState::Exhausted,
        Err(_) => PlayState::Failed,
    };
    tracing::info!(state = ?next, "playback finished");
    set_state(state, next);
    result
}

fn run_passes(
    content: &Sequence,
    options: &PlayOptions,
    array: &Array,
    token: &CancelToken,
) -> LedResult<PlayReport> {
    let mut report = PlayReport::default();
    let items = content.items();
    if content.first_frame().is_none() {
        return Ok(report);
    }

    let mut rng = rand::thread_rng();
    let mut order: Vec<usize> = (0..items.len()).collect();
    let mut previous: Option<(usize, &Frame)> = None;
    let mut pass = 0u32;

    tracing::info!("playback started");
    while options.loops.allows(pass) {
        if options.random {
            shuffle_avoiding(&mut order, previous.map(|(i, _)| i), &mut rng);
        }

        let mut failed = 0usize;
        let mut last_error = None;
        for &index in &order {
            if token.is_cancelled() {
                return Ok(report);
            }
            let item = &items[index];
            if item.first_frame().is_none() {
                continue;
            }
            tracing::debug!(pass, index, "showing item");

            match show_item(
                item,
                content.default_hold(),
                previous.map(|(_, f)| f),
                options,
                array,
                token,
                &mut rng,
                &mut report,
            ) {
                Ok(Shown::Completed(last)) => {
                    previous = Some((index, last));
                    report.items_shown += 1;
                }
                Ok(Shown::Cancelled) => return Ok(report),
                Err(e) => match options.on_error {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::SkipFrame => {
                        tracing::warn!(pass, index, error = %e, "skipping item");
                        report.skipped += 1;
                        failed += 1;
                        last_error = Some(e);
                    }
                },
            }
        }

        let playable = items.iter().filter(|i| i.first_frame().is_some()).count();
        if failed == playable {
            if let Some(e) = last_error {
                tracing::warn!(pass, "every item failed in this pass; giving up");
                return Err(e);
            }
        }

        pass += 1;
        report.passes = pass;
    }
    Ok(report)
}

/// Shuffle `order`, keeping `last` out of the first slot so an item never follows itself.
fn shuffle_avoiding(order: &mut [usize], last: Option<usize>, rng: &mut impl Rng) {
    order.shuffle(rng);
    if order.len() > 1 && order.first() == last.as_ref() {
        let end = order.len() - 1;
        order.swap(0, rng.gen_range(1..=end));
    }
}

#[allow(clippy::too_many_arguments)]
fn show_item<'a>(
    item: &'a Content,
    default_hold: Duration,
    previous: Option<&Frame>,
    options: &PlayOptions,
    array: &Array,
    token: &CancelToken,
    rng: &mut impl Rng,
    report: &mut PlayReport,
) -> LedResult<Shown<'a>> {
    let frames = item.frames(default_hold);
    let (Some(&(first, _)), Some(&(last, _))) = (frames.first(), frames.last()) else {
        return Err(LedError::invalid_argument("item has no frames"));
    };

    if let Some(source) = previous {
        let transition =
            Transition::resolve(options.transition, options.direction, options.blend, rng)?
                .with_ease(options.ease);
        if !transition.is_instant() {
            tracing::debug!(?transition, "running transition");
            let timing = FadeTiming::new(options.transition_duration)
                .with_frame_time(options.frame_time);
            let outcome = drive(
                &timing,
                Some(token),
                |factor| array.write(&transition.compose(source, first, factor)?),
                || Ok(()),
            )?;
            if let FadeOutcome::Cancelled { .. } = outcome {
                return Ok(Shown::Cancelled);
            }
            report.transitions += 1;
        }
    }

    let slice = if options.frame_time.is_zero() {
        DEFAULT_FRAME_TIME
    } else {
        options.frame_time
    };
    for (frame, hold) in frames {
        if token.is_cancelled() {
            return Ok(Shown::Cancelled);
        }
        array.write(frame)?;
        if !token.sleep_unless_cancelled(hold, slice) {
            return Ok(Shown::Cancelled);
        }
    }
    Ok(Shown::Completed(last))
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
