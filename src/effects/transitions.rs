use rand::{Rng, seq::SliceRandom};

use crate::{
    animation::ease::Ease,
    color::blend::BlendMode,
    foundation::error::{LedError, LedResult},
    frame::grid::Frame,
};

/// How the previous item gives way to the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    /// Jump to the target without intermediate frames.
    Straight,
    /// Cross-fade every pixel at once.
    #[default]
    Fade,
    /// A straight or diagonal front sweeps across the canvas.
    Wipe,
    /// Target opens from the centre line outwards.
    CurtainOpen,
    /// Target closes in from both edges.
    CurtainClose,
    /// A circle grows from, or shrinks towards, the centre.
    Disc,
    /// Pick a concrete type, direction and blend per transition.
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    LeftRight,
    RightLeft,
    UpDown,
    DownUp,
    DiagonalFromTopLeft,
    DiagonalFromTopRight,
    DiagonalFromBottomLeft,
    DiagonalFromBottomRight,
    Horizontal,
    Vertical,
    InOut,
    OutIn,
}

impl TransitionDirection {
    pub const ALL: [TransitionDirection; 12] = [
        Self::LeftRight,
        Self::RightLeft,
        Self::UpDown,
        Self::DownUp,
        Self::DiagonalFromTopLeft,
        Self::DiagonalFromTopRight,
        Self::DiagonalFromBottomLeft,
        Self::DiagonalFromBottomRight,
        Self::Horizontal,
        Self::Vertical,
        Self::InOut,
        Self::OutIn,
    ];
}

const WIPE_DIRECTIONS: [TransitionDirection; 8] = [
    TransitionDirection::LeftRight,
    TransitionDirection::RightLeft,
    TransitionDirection::UpDown,
    TransitionDirection::DownUp,
    TransitionDirection::DiagonalFromTopLeft,
    TransitionDirection::DiagonalFromTopRight,
    TransitionDirection::DiagonalFromBottomLeft,
    TransitionDirection::DiagonalFromBottomRight,
];

const CURTAIN_DIRECTIONS: [TransitionDirection; 2] =
    [TransitionDirection::Horizontal, TransitionDirection::Vertical];

const DISC_DIRECTIONS: [TransitionDirection; 2] =
    [TransitionDirection::InOut, TransitionDirection::OutIn];

impl TransitionType {
    /// Types that `Random` draws from.
    pub const CONCRETE: [TransitionType; 5] = [
        Self::Fade,
        Self::Wipe,
        Self::CurtainOpen,
        Self::CurtainClose,
        Self::Disc,
    ];

    pub fn supported_directions(self) -> &'static [TransitionDirection] {
        match self {
            Self::Straight | Self::Fade | Self::Random => &TransitionDirection::ALL,
            Self::Wipe => &WIPE_DIRECTIONS,
            Self::CurtainOpen | Self::CurtainClose => &CURTAIN_DIRECTIONS,
            Self::Disc => &DISC_DIRECTIONS,
        }
    }

    pub fn supports(self, direction: TransitionDirection) -> bool {
        self.supported_directions().contains(&direction)
    }

    /// Fail with [`LedError::NotSupported`] for a direction this type cannot run.
    pub fn ensure_supports(self, direction: TransitionDirection) -> LedResult<()> {
        if self.supports(direction) {
            Ok(())
        } else {
            Err(LedError::not_supported(format!(
                "{self:?} transition does not support direction {direction:?}"
            )))
        }
    }
}

/// A fully resolved transition, ready to compose intermediate frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionType,
    pub direction: TransitionDirection,
    pub blend: BlendMode,
    pub ease: Ease,
}

impl Transition {
    /// Validate a concrete combination. `Random` must go through [`Transition::resolve`].
    pub fn new(
        kind: TransitionType,
        direction: TransitionDirection,
        blend: BlendMode,
    ) -> LedResult<Self> {
        if kind == TransitionType::Random {
            return Err(LedError::invalid_argument(
                "random transitions are resolved per use, not constructed",
            ));
        }
        kind.ensure_supports(direction)?;
        Ok(Self {
            kind,
            direction,
            blend,
            ease: Ease::Linear,
        })
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Fill in whatever the caller left open.
    ///
    /// `Random` picks a concrete type; a missing direction or blend is drawn
    /// from what the chosen type supports. An explicit direction the chosen
    /// type cannot run is rejected rather than silently replaced, except under
    /// `Random`, where the draw is restricted to types that support it.
    pub fn resolve(
        kind: TransitionType,
        direction: Option<TransitionDirection>,
        blend: Option<BlendMode>,
        rng: &mut impl Rng,
    ) -> LedResult<Self> {
        let kind = match kind {
            TransitionType::Random => {
                let candidates: Vec<TransitionType> = TransitionType::CONCRETE
                    .into_iter()
                    .filter(|t| direction.is_none_or(|d| t.supports(d)))
                    .collect();
                *candidates.choose(rng).ok_or_else(|| {
                    LedError::not_supported(format!(
                        "no transition type supports direction {direction:?}"
                    ))
                })?
            }
            kind => kind,
        };

        let direction = match direction {
            Some(d) => d,
            None => *kind
                .supported_directions()
                .choose(rng)
                .ok_or_else(|| LedError::not_supported(format!("{kind:?} has no directions")))?,
        };
        let blend = match blend {
            Some(b) => b,
            None => BlendMode::ALL[rng.gen_range(0..BlendMode::ALL.len())],
        };

        Self::new(kind, direction, blend)
    }

    /// True when the transition has no intermediate frames.
    pub fn is_instant(&self) -> bool {
        self.kind == TransitionType::Straight
    }

    /// Intermediate frame at `progress` in `[0, 1]`.
    ///
    /// Pixels reached by the transition front show `source` mixed toward
    /// `target` under the blend mode; the rest still show `source`. Nothing is
    /// reached at progress 0 and everything is reached at progress 1.
    pub fn compose(&self, source: &Frame, target: &Frame, progress: f64) -> LedResult<Frame> {
        source.ensure_compatible(target)?;
        let factor = self.ease.apply(progress);

        match self.kind {
            TransitionType::Straight => return Ok(target.clone()),
            TransitionType::Fade => return source.fade(target, factor),
            _ => {}
        }

        let mut out = source.clone();
        if factor <= 0.0 {
            return Ok(out);
        }
        let (w, h) = (source.width(), source.height());
        for y in 0..h {
            for x in 0..w {
                if self.covers(x, y, w, h, factor) {
                    let (xi, yi) = (x as i32, y as i32);
                    let c = source
                        .get(xi, yi)
                        .mix(&target.get(xi, yi), factor, self.blend)?;
                    out.set(xi, yi, c);
                }
            }
        }
        Ok(out)
    }

    fn covers(&self, x: u32, y: u32, w: u32, h: u32, factor: f64) -> bool {
        use TransitionDirection as D;

        let (xf, yf, wf, hf) = (f64::from(x), f64::from(y), f64::from(w), f64::from(h));
        let front = |extent: f64| (extent * factor).round();
        let diagonal = |d: u32| f64::from(d) < (factor * (wf + hf - 1.0)).round();
        let half_w = wf / 2.0;
        let half_h = hf / 2.0;

        match (self.kind, self.direction) {
            (TransitionType::Wipe, D::LeftRight) => xf < front(wf),
            (TransitionType::Wipe, D::RightLeft) => xf >= wf - front(wf),
            (TransitionType::Wipe, D::UpDown) => yf < front(hf),
            (TransitionType::Wipe, D::DownUp) => yf >= hf - front(hf),
            (TransitionType::Wipe, D::DiagonalFromTopLeft) => diagonal(x + y),
            (TransitionType::Wipe, D::DiagonalFromTopRight) => diagonal(w - 1 - x + y),
            (TransitionType::Wipe, D::DiagonalFromBottomLeft) => diagonal(x + h - 1 - y),
            (TransitionType::Wipe, D::DiagonalFromBottomRight) => {
                diagonal(w - 1 - x + h - 1 - y)
            }
            (TransitionType::CurtainOpen, D::Horizontal) => {
                (xf + 0.5 - half_w).abs() + 0.5 <= factor * half_w
            }
            (TransitionType::CurtainOpen, D::Vertical) => {
                (yf + 0.5 - half_h).abs() + 0.5 <= factor * half_h
            }
            (TransitionType::CurtainClose, D::Horizontal) => {
                f64::from(x.min(w - 1 - x)) + 0.5 <= factor * half_w
            }
            (TransitionType::CurtainClose, D::Vertical) => {
                f64::from(y.min(h - 1 - y)) + 0.5 <= factor * half_h
            }
            (TransitionType::Disc, dir @ (D::InOut | D::OutIn)) => {
                let r = (xf + 0.5 - half_w).hypot(yf + 0.5 - half_h);
                let r_max = half_w.hypot(half_h);
                if dir == D::InOut {
                    r <= factor * r_max
                } else {
                    r_max - r <= factor * r_max
                }
            }
            _ => true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
