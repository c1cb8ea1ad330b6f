use std::sync::Mutex;

use super::*;
use crate::color::model::ColorLayout;

struct Recorder<T> {
    writes: Mutex<Vec<T>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> Recorder<T> {
    fn writes(&self) -> Vec<T> {
        self.writes.lock().unwrap().clone()
    }
}

impl<T: Clone> Endpoint<T> for Recorder<T> {
    fn write(&self, value: &T) -> LedResult<()> {
        self.writes.lock().unwrap().push(value.clone());
        Ok(())
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn zero_duration_writes_target_only() {
    let rec = Recorder::default();
    let a = Color::rgb(0, 0, 0);
    let b = Color::rgb(255, 255, 255);
    let outcome = fade(&a, &b, &rec, &FadeTiming::new(Duration::ZERO), None).unwrap();
    assert_eq!(outcome, FadeOutcome::Completed { ticks: 0 });
    assert_eq!(rec.writes(), vec![b]);
}

#[test]
fn ends_exactly_on_target_after_ticks() {
    let rec = Recorder::default();
    let a = Color::rgb(0, 0, 0);
    let b = Color::rgb(200, 100, 0);
    let timing = FadeTiming::new(ms(10)).with_frame_time(ms(1));
    let outcome = fade(&a, &b, &rec, &timing, None).unwrap();
    assert!(outcome.is_completed());

    let writes = rec.writes();
    assert_eq!(writes.first(), Some(&a));
    assert_eq!(writes.last(), Some(&b));
    // ten steps of 0.1 land on or just past 1.0
    assert!((10..=12).contains(&writes.len()), "{}", writes.len());
    for pair in writes.windows(2) {
        assert!(pair[0].to_rgb().r <= pair[1].to_rgb().r);
    }
}

#[test]
fn short_duration_degrades_to_a_jump() {
    let rec = Recorder::default();
    let timing = FadeTiming::new(ms(1)).with_frame_time(ms(5));
    let outcome = fade(
        &Color::rgb(0, 0, 0),
        &Color::rgb(9, 9, 9),
        &rec,
        &timing,
        None,
    )
    .unwrap();
    assert_eq!(outcome, FadeOutcome::Completed { ticks: 1 });
    assert_eq!(rec.writes(), vec![Color::rgb(0, 0, 0), Color::rgb(9, 9, 9)]);
}

#[test]
fn incompatible_operands_fail_before_any_write() {
    let rec = Recorder::default();
    let err = fade(
        &Color::rgb(0, 0, 0),
        &Color::rgbw(0, 0, 0, 9),
        &rec,
        &FadeTiming::new(ms(5)).with_frame_time(ms(1)),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LedError::InvalidArgument(_)));
    assert!(rec.writes().is_empty());

    let frames = Recorder::<Frame>::default();
    let err = fade(
        &Frame::black(2, 2, ColorLayout::Rgb),
        &Frame::black(2, 3, ColorLayout::Rgb),
        &frames,
        &FadeTiming::new(ms(5)).with_frame_time(ms(1)),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LedError::InvalidArgument(_)));
    assert!(frames.writes().is_empty());
}

#[test]
fn zero_frame_time_is_rejected() {
    let timing = FadeTiming::new(ms(5)).with_frame_time(Duration::ZERO);
    assert!(drive(&timing, None, |_| Ok(()), || Ok(())).is_err());
}

#[test]
fn cancelled_fade_skips_target() {
    let token = CancelToken::new();
    token.cancel();
    let rec = Recorder::default();
    let outcome = fade(
        &Color::rgb(0, 0, 0),
        &Color::rgb(1, 1, 1),
        &rec,
        &FadeTiming::new(ms(5)).with_frame_time(ms(1)),
        Some(&token),
    )
    .unwrap();
    assert_eq!(outcome, FadeOutcome::Cancelled { ticks: 0 });
    assert!(rec.writes().is_empty());
}

#[test]
fn tick_errors_stop_the_fade() {
    let timing = FadeTiming::new(ms(5)).with_frame_time(ms(1));
    let mut finished = false;
    let err = drive(
        &timing,
        None,
        |_| Err(LedError::endpoint_unavailable("down")),
        || {
            finished = true;
            Ok(())
        },
    )
    .unwrap_err();
    assert!(err.is_endpoint());
    assert!(!finished);
}

#[test]
fn fader_tracks_current_value() {
    let rec = Recorder::default();
    let mut fader = Fader::new(Color::rgb(0, 0, 0));
    let timing = FadeTiming::new(ms(3)).with_frame_time(ms(1));
    fader
        .fade_to(Color::rgb(90, 0, 0), &rec, &timing, None)
        .unwrap();
    assert_eq!(fader.current(), &Color::rgb(90, 0, 0));

    fader
        .fade_to(Color::rgb(0, 90, 0), &rec, &timing, None)
        .unwrap();
    assert_eq!(fader.current(), &Color::rgb(0, 90, 0));
    assert_eq!(rec.writes().last(), Some(&Color::rgb(0, 90, 0)));
}
