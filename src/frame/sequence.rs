use std::time::Duration;

use crate::color::blend::BlendMode;
use crate::foundation::error::{LedError, LedResult};
use crate::frame::grid::Frame;

/// One element of a [`Sequence`]: a still frame or a nested sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Frame(Frame),
    Sequence(Sequence),
}

impl Content {
    /// Innermost first frame; empty nested sequences are skipped.
    pub fn first_frame(&self) -> Option<&Frame> {
        match self {
            Self::Frame(f) => Some(f),
            Self::Sequence(s) => s.items.iter().find_map(Content::first_frame),
        }
    }

    /// Innermost last frame; empty nested sequences are skipped.
    pub fn last_frame(&self) -> Option<&Frame> {
        match self {
            Self::Frame(f) => Some(f),
            Self::Sequence(s) => s.items.iter().rev().find_map(Content::last_frame),
        }
    }

    /// Flatten into `(frame, hold)` pairs, resolving each hold against `default_hold`.
    pub fn frames(&self, default_hold: Duration) -> Vec<(&Frame, Duration)> {
        let mut out = Vec::new();
        self.collect_frames(default_hold, &mut out);
        out
    }

    fn collect_frames<'a>(&'a self, default_hold: Duration, out: &mut Vec<(&'a Frame, Duration)>) {
        match self {
            Self::Frame(f) => out.push((f, f.hold().unwrap_or(default_hold))),
            Self::Sequence(s) => {
                for item in &s.items {
                    item.collect_frames(s.default_hold, out);
                }
            }
        }
    }
}

impl From<Frame> for Content {
    fn from(f: Frame) -> Self {
        Self::Frame(f)
    }
}

impl From<Sequence> for Content {
    fn from(s: Sequence) -> Self {
        Self::Sequence(s)
    }
}

/// Ordered, time-delayed list of frames or nested sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    items: Vec<Content>,
    default_hold: Duration,
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Sequence {
    pub fn new(default_hold: Duration) -> Self {
        Self {
            items: Vec::new(),
            default_hold,
        }
    }

    pub fn with_items(default_hold: Duration, items: impl IntoIterator<Item = Content>) -> Self {
        Self {
            items: items.into_iter().collect(),
            default_hold,
        }
    }

    pub fn push(&mut self, item: impl Into<Content>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    /// Append the items of `other`, keeping their own holds.
    pub fn append(&mut self, other: Sequence) -> &mut Self {
        let hold = other.default_hold;
        for item in other.items {
            match item {
                Content::Frame(f) if f.hold().is_none() => {
                    self.items.push(f.with_hold(hold).into())
                }
                item => self.items.push(item),
            }
        }
        self
    }

    pub fn items(&self) -> &[Content] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn default_hold(&self) -> Duration {
        self.default_hold
    }

    pub fn first_frame(&self) -> Option<&Frame> {
        self.items.iter().find_map(Content::first_frame)
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.items.iter().rev().find_map(Content::last_frame)
    }

    /// Every constituent frame in playback order with its effective hold.
    pub fn frames(&self) -> Vec<(&Frame, Duration)> {
        let mut out = Vec::new();
        for item in &self.items {
            item.collect_frames(self.default_hold, &mut out);
        }
        out
    }

    /// Build a banner that moves in from the right, scrolls across and moves out to the left.
    pub fn scrolling_banner(
        banner: &Frame,
        width: u32,
        height: u32,
        hold: Duration,
    ) -> LedResult<Sequence> {
        if width == 0 || height == 0 {
            return Err(LedError::invalid_argument(
                "scrolling banner target must be non-empty",
            ));
        }
        let rows = banner.height().min(height);
        let bw = banner.width() as i32;
        let tw = width as i32;
        let mut seq = Sequence::new(hold);

        let mut stamp = |src: Frame, at_x: i32| -> LedResult<()> {
            let mut canvas = Frame::black(width, height, banner.layout());
            canvas.replace_sub_frame(&src, at_x, 0, BlendMode::Replace)?;
            seq.push(canvas);
            Ok(())
        };

        for visible in 1..tw {
            stamp(banner.sub_frame(0, 0, visible as u32, rows), tw - visible)?;
        }
        for offset in 0..=(bw - tw).max(0) {
            stamp(banner.sub_frame(offset, 0, width, rows), 0)?;
        }
        for visible in (0..tw).rev() {
            stamp(banner.sub_frame(bw - visible, 0, visible as u32, rows), 0)?;
        }

        Ok(seq)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/sequence.rs"]
mod tests;
